//! The scoring service seam.
//!
//! Implemented over HTTP by `examportal-client`, and in memory by its mock.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::model::{CandidateSubmission, ExamSummary, NewExam, SubmitAck};
use crate::navigation::ResultLocation;

/// A remote service that scores submissions and serves results.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Human-readable service name, used in logs.
    fn name(&self) -> &str;

    /// Send one submission for scoring.
    async fn submit(&self, submission: &CandidateSubmission) -> Result<SubmitAck, ServiceError>;

    /// Fetch the result body for a location.
    ///
    /// The body is returned whatever the response status: the service reports
    /// logical failures as `{"error": "..."}` alongside 4xx codes, and it is up
    /// to the caller to interpret it.
    async fn fetch_result(&self, location: &ResultLocation)
        -> Result<serde_json::Value, ServiceError>;

    /// List the exams the service can score.
    async fn list_exams(&self) -> Result<Vec<ExamSummary>, ServiceError>;

    /// Create an exam with its marking scheme.
    async fn create_exam(&self, exam: &NewExam) -> Result<(), ServiceError>;

    /// Delete an exam and everything recorded for it.
    async fn delete_exam(&self, exam_name: &str) -> Result<(), ServiceError>;
}
