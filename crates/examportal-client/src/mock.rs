//! Mock scoring service for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use examportal_core::error::ServiceError;
use examportal_core::model::{CandidateSubmission, ExamSummary, Figure, NewExam, ResultRecord, SubmitAck};
use examportal_core::navigation::ResultLocation;
use examportal_core::traits::ScoringService;

/// An in-memory scoring service for exercising the flows without a backend.
///
/// Unknown locations answer `{"error": "Candidate not found"}`, as the real
/// service does.
#[derive(Default)]
pub struct MockScoringService {
    /// Bodies served per location.
    results: Mutex<HashMap<ResultLocation, Value>>,
    /// Exam catalogue.
    exams: Mutex<Vec<ExamSummary>>,
    /// Submissions received, in order.
    submissions: Mutex<Vec<CandidateSubmission>>,
    /// When set, every call fails with a network error.
    offline: bool,
    fetch_count: AtomicU32,
}

impl MockScoringService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service that is unreachable.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Serve `record` at `location`.
    pub fn with_result(self, location: ResultLocation, record: &ResultRecord) -> Self {
        let body = serde_json::to_value(record).unwrap_or(Value::Null);
        self.with_body(location, body)
    }

    /// Serve an arbitrary body at `location`.
    pub fn with_body(self, location: ResultLocation, body: Value) -> Self {
        self.results.lock().unwrap().insert(location, body);
        self
    }

    /// Seed the exam catalogue.
    pub fn with_exams(self, exams: Vec<ExamSummary>) -> Self {
        *self.exams.lock().unwrap() = exams;
        self
    }

    /// Submissions received so far.
    pub fn submissions(&self) -> Vec<CandidateSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    /// Number of result fetches made.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    fn check_online(&self) -> Result<(), ServiceError> {
        if self.offline {
            Err(ServiceError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ScoringService for MockScoringService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit(&self, submission: &CandidateSubmission) -> Result<SubmitAck, ServiceError> {
        self.check_online()?;
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(SubmitAck {
            status: 200,
            body: json!({"status": "saved"}).to_string(),
        })
    }

    async fn fetch_result(&self, location: &ResultLocation) -> Result<Value, ServiceError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.check_online()?;
        Ok(self
            .results
            .lock()
            .unwrap()
            .get(location)
            .cloned()
            .unwrap_or_else(|| json!({"error": "Candidate not found"})))
    }

    async fn list_exams(&self) -> Result<Vec<ExamSummary>, ServiceError> {
        self.check_online()?;
        Ok(self.exams.lock().unwrap().clone())
    }

    async fn create_exam(&self, exam: &NewExam) -> Result<(), ServiceError> {
        self.check_online()?;
        let mut exams = self.exams.lock().unwrap();
        exams.retain(|e| e.exam_name.as_deref() != Some(exam.exam_name.as_str()));
        exams.push(ExamSummary {
            exam_name: Some(exam.exam_name.clone()),
            correct: Some(Figure::Float(exam.correct)),
            wrong: Some(Figure::Float(exam.wrong)),
            na: Some(Figure::Float(exam.na)),
        });
        Ok(())
    }

    async fn delete_exam(&self, exam_name: &str) -> Result<(), ServiceError> {
        self.check_online()?;
        let mut exams = self.exams.lock().unwrap();
        let before = exams.len();
        exams.retain(|e| e.exam_name.as_deref() != Some(exam_name));
        if exams.len() == before {
            return Err(ServiceError::Rejected {
                status: 404,
                message: "exam not found".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(exam: &str, roll: &str) -> ResultLocation {
        ResultLocation {
            exam: exam.into(),
            roll: roll.into(),
        }
    }

    #[tokio::test]
    async fn unknown_location_reports_not_found() {
        let service = MockScoringService::new();
        let body = service.fetch_result(&loc("Mock_Exam", "9")).await.unwrap();
        assert_eq!(body["error"], "Candidate not found");
        assert_eq!(service.fetch_count(), 1);
    }

    #[tokio::test]
    async fn offline_fails_every_call() {
        let service = MockScoringService::offline();
        assert!(matches!(
            service.fetch_result(&loc("A", "1")).await,
            Err(ServiceError::Network(_))
        ));
        assert!(service.list_exams().await.is_err());
    }

    #[tokio::test]
    async fn exam_catalogue_create_and_delete() {
        let service = MockScoringService::new();
        service
            .create_exam(&NewExam {
                exam_name: "Mock Exam".into(),
                correct: 4.0,
                wrong: -1.0,
                na: 0.0,
            })
            .await
            .unwrap();
        assert_eq!(service.list_exams().await.unwrap().len(), 1);

        service.delete_exam("Mock Exam").await.unwrap();
        assert!(service.list_exams().await.unwrap().is_empty());
        assert!(service.delete_exam("Mock Exam").await.is_err());
    }
}
