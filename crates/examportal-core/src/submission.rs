//! The submission flow.
//!
//! Validates the operator's form, sends it as a detached task, and navigates
//! to the result location without waiting for the service.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::model::{AnswerFile, CandidateSubmission};
use crate::navigation::ResultLocation;
use crate::traits::ScoringService;

/// Raw form input, exactly as entered.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    /// The exam chosen on the selection screen.
    pub exam_name: Option<String>,
    pub name: String,
    pub roll: String,
    pub category: String,
    pub gender: String,
    pub state: String,
    pub file: Option<AnswerFile>,
}

impl SubmissionForm {
    /// Check that every field is filled and a file is attached.
    ///
    /// Text fields are trimmed; whitespace-only input counts as missing.
    pub fn validate(self) -> Result<CandidateSubmission, ValidationError> {
        let exam_name = self.exam_name.as_deref().map(str::trim).unwrap_or_default();
        let fields = [
            ("exam_name", exam_name),
            ("name", self.name.trim()),
            ("roll", self.roll.trim()),
            ("category", self.category.trim()),
            ("gender", self.gender.trim()),
            ("state", self.state.trim()),
        ];

        let mut missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();
        if self.file.is_none() {
            missing.push("file");
        }

        match self.file {
            Some(file) if missing.is_empty() => {
                let [exam_name, name, roll, category, gender, state] =
                    fields.map(|(_, value)| value.to_string());
                Ok(CandidateSubmission {
                    exam_name,
                    name,
                    roll,
                    category,
                    gender,
                    state,
                    file,
                })
            }
            _ => Err(ValidationError { missing }),
        }
    }
}

/// Where the submission flow sends the operator next.
#[derive(Debug)]
pub struct Navigation {
    pub location: ResultLocation,
    /// The in-flight submission. It resolves to `()` whatever the service
    /// did; awaiting it only lets a short-lived process finish sending.
    pub dispatch: JoinHandle<()>,
}

/// Validate the form, fire the submission, and return the result location.
///
/// Must be called from within a Tokio runtime. The request runs detached:
/// its failure is logged and never reaches the caller, and the returned
/// location does not depend on it.
pub fn submit(
    form: SubmissionForm,
    service: Arc<dyn ScoringService>,
) -> Result<Navigation, ValidationError> {
    let submission = form.validate().map_err(|e| {
        info!(missing = ?e.missing, "submission rejected before sending");
        e
    })?;

    let location = ResultLocation::for_submission(&submission.exam_name, &submission.roll);

    let dispatch = tokio::spawn(async move {
        match service.submit(&submission).await {
            Ok(ack) if ack.is_success() => {
                debug!(service = service.name(), status = ack.status, "evaluation request accepted");
            }
            Ok(ack) => {
                warn!(
                    service = service.name(),
                    status = ack.status,
                    body = %ack.body,
                    "evaluation request returned an error status"
                );
            }
            Err(e) => {
                warn!(service = service.name(), error = %e, "evaluation request failed");
            }
        }
    });

    Ok(Navigation { location, dispatch })
}
