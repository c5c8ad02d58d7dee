//! HTTP scoring service implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use examportal_core::error::ServiceError;
use examportal_core::model::{CandidateSubmission, ExamSummary, NewExam, SubmitAck};
use examportal_core::navigation::ResultLocation;
use examportal_core::traits::ScoringService;

/// Scoring service reached over HTTP.
pub struct HttpScoringService {
    base_url: String,
    timeout_secs: Option<u64>,
    client: reqwest::Client,
}

impl HttpScoringService {
    /// Create a client for the service at `base_url`.
    ///
    /// Requests never time out unless `timeout_secs` is set.
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> Result<Self, ServiceError> {
        Url::parse(base_url)
            .map_err(|e| ServiceError::InvalidRequest(format!("bad base URL '{base_url}': {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| ServiceError::InvalidRequest(format!("bad endpoint '{path}': {e}")))
    }

    fn transport_error(&self, e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::Timeout(self.timeout_secs.unwrap_or_default())
        } else {
            ServiceError::Network(e.to_string())
        }
    }

    /// Turn a 4xx/5xx admin response into `Rejected`, preferring the
    /// service's own `error` message over the raw body.
    async fn rejection(response: reqwest::Response) -> ServiceError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);
        ServiceError::Rejected { status, message }
    }

    async fn post_admin(&self, path: &str, body: &Value) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status().is_client_error() || response.status().is_server_error() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, submission), fields(exam = %submission.exam_name, roll = %submission.roll))]
    async fn submit(&self, submission: &CandidateSubmission) -> Result<SubmitAck, ServiceError> {
        let mut form = Form::new();
        for (field, value) in submission.text_fields() {
            form = form.text(field, value.to_string());
        }
        let file = &submission.file;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| ServiceError::InvalidRequest(format!("bad content type: {e}")))?;
        form = form.part("file", part);

        let response = self
            .client
            .post(self.endpoint("/evaluate")?)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!(status, "evaluate responded");
        Ok(SubmitAck { status, body })
    }

    #[instrument(skip(self))]
    async fn fetch_result(
        &self,
        location: &ResultLocation,
    ) -> Result<serde_json::Value, ServiceError> {
        let mut url = self.endpoint("/result")?;
        url.set_query(Some(&location.query()));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        debug!(status, "result responded");
        response.json::<Value>().await.map_err(|e| {
            ServiceError::MalformedResponse(format!("failed to parse result (HTTP {status}): {e}"))
        })
    }

    #[instrument(skip(self))]
    async fn list_exams(&self) -> Result<Vec<ExamSummary>, ServiceError> {
        let response = self
            .client
            .get(self.endpoint("/admin/exams")?)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status().is_client_error() || response.status().is_server_error() {
            return Err(Self::rejection(response).await);
        }
        response
            .json::<Vec<ExamSummary>>()
            .await
            .map_err(|e| ServiceError::MalformedResponse(format!("failed to parse exam list: {e}")))
    }

    #[instrument(skip(self, exam), fields(exam = %exam.exam_name))]
    async fn create_exam(&self, exam: &NewExam) -> Result<(), ServiceError> {
        let body = serde_json::to_value(exam)
            .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;
        self.post_admin("/admin/create-exam", &body).await
    }

    #[instrument(skip(self))]
    async fn delete_exam(&self, exam_name: &str) -> Result<(), ServiceError> {
        let body = serde_json::json!({ "exam_name": exam_name });
        self.post_admin("/admin/delete-exam", &body).await
    }
}
