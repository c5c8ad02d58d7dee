//! The result flow.
//!
//! `ResultPage` models everything the result view displays. Loading a page
//! walks `AwaitingParams -> MissingParams | Fetching -> ServiceError |
//! Rendered | Unavailable`; every end state is display-only.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, instrument};

use crate::error::RenderError;
use crate::model::{Aggregate, SubjectEntry};
use crate::navigation::{display_exam_title, ResultLocation};
use crate::traits::ScoringService;

pub const LOADING_MESSAGE: &str = "Fetching result...";
pub const MISSING_PARAMS_MESSAGE: &str = "Result details not provided.";
pub const UNAVAILABLE_MESSAGE: &str = "Result not available yet. Please try again later.";
pub const OVERALL_LABEL: &str = "Overall";

/// Column headings of the results table, in display order.
pub const COLUMNS: [&str; 6] = ["Subject", "Attempted", "Not Attempted", "Right", "Wrong", "Marks"];

/// Where the page ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultState {
    AwaitingParams,
    MissingParams,
    Fetching,
    /// The service answered with an `error` message.
    ServiceError,
    Rendered,
    /// Transport failure or a body we could not render.
    Unavailable,
}

/// The status line above the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusArea {
    pub text: String,
    pub visible: bool,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub figures: Aggregate,
    /// Set on the overall row only.
    pub highlighted: bool,
}

impl TableRow {
    /// Cell texts in `COLUMNS` order.
    pub fn cells(&self) -> [String; 6] {
        let f = &self.figures;
        [
            self.label.clone(),
            f.attempt.to_string(),
            f.na.to_string(),
            f.right.to_string(),
            f.wrong.to_string(),
            f.marks.to_string(),
        ]
    }
}

/// Everything the result view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub status: StatusArea,
    pub exam_title: String,
    pub candidate_name: String,
    pub candidate_roll: String,
    pub rows: Vec<TableRow>,
    pub state: ResultState,
}

impl Default for ResultPage {
    fn default() -> Self {
        Self {
            status: StatusArea {
                text: LOADING_MESSAGE.to_string(),
                visible: true,
            },
            exam_title: String::new(),
            candidate_name: String::new(),
            candidate_roll: String::new(),
            rows: Vec::new(),
            state: ResultState::AwaitingParams,
        }
    }
}

impl ResultPage {
    /// Apply a result body to the page.
    ///
    /// Fields are applied in display order, so an error part-way leaves the
    /// earlier ones in place.
    pub fn apply(&mut self, body: &Value) -> Result<(), RenderError> {
        let obj = body.as_object().ok_or(RenderError::NotAnObject)?;

        if let Some(message) = obj.get("error").and_then(error_message) {
            self.status.text = message;
            self.state = ResultState::ServiceError;
            return Ok(());
        }

        self.status.visible = false;

        let exam: String = field(obj, "exam")?;
        self.exam_title = display_exam_title(&exam);

        // Only name and roll are shown; the rest of the block is never read.
        let candidate: Map<String, Value> = field(obj, "candidate")?;
        self.candidate_name = display_text(candidate.get("name"));
        self.candidate_roll = display_text(candidate.get("roll"));

        self.rows.clear();
        let subjects: Vec<Value> = field(obj, "subjects")?;
        for subject in subjects {
            let entry: SubjectEntry = serde_json::from_value(subject)
                .map_err(|source| RenderError::InvalidField {
                    field: "subjects",
                    source,
                })?;
            self.rows.push(TableRow {
                label: entry.name,
                figures: Aggregate {
                    attempt: entry.attempt,
                    na: entry.na,
                    right: entry.right,
                    wrong: entry.wrong,
                    marks: entry.marks,
                },
                highlighted: false,
            });
        }

        let overall: Aggregate = field(obj, "overall")?;
        self.rows.push(TableRow {
            label: OVERALL_LABEL.to_string(),
            figures: overall,
            highlighted: true,
        });

        self.state = ResultState::Rendered;
        Ok(())
    }

    fn mark_unavailable(&mut self) {
        self.status.text = UNAVAILABLE_MESSAGE.to_string();
        self.state = ResultState::Unavailable;
    }
}

/// The message carried by an `error` member, if it counts as set.
///
/// Null, `false`, zero and the empty string mean "no error".
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Text shown for a displayed value: strings as-is, anything else as JSON.
fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, name: &'static str) -> Result<T, RenderError> {
    let value = obj.get(name).ok_or(RenderError::MissingField(name))?;
    T::deserialize(value).map_err(|source| RenderError::InvalidField {
        field: name,
        source,
    })
}

/// Load the result view for a location.
///
/// `None` means the page was opened without `exam` and `roll`; no request is
/// made. Failures never escape: they end up on the page.
#[instrument(skip(service), fields(service = service.name()))]
pub async fn load_result_page(
    location: Option<&ResultLocation>,
    service: &dyn ScoringService,
) -> ResultPage {
    let mut page = ResultPage::default();

    let Some(location) = location else {
        page.status.text = MISSING_PARAMS_MESSAGE.to_string();
        page.state = ResultState::MissingParams;
        return page;
    };

    page.state = ResultState::Fetching;
    match service.fetch_result(location).await {
        Ok(body) => {
            if let Err(e) = page.apply(&body) {
                error!(error = %e, "could not render result");
                page.mark_unavailable();
            }
        }
        Err(e) => {
            error!(error = %e, "could not fetch result");
            page.mark_unavailable();
        }
    }

    info!(state = ?page.state, "result page loaded");
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Figure;
    use serde_json::json;

    fn mock_exam_body() -> Value {
        json!({
            "exam": "Mock_Exam",
            "candidate": {"name": "A", "roll": "1"},
            "subjects": [{"name": "Math", "attempt": 1, "na": 0, "right": 1, "wrong": 0, "marks": 4}],
            "overall": {"attempt": 1, "na": 0, "right": 1, "wrong": 0, "marks": 4}
        })
    }

    #[test]
    fn default_page_awaits_params() {
        let page = ResultPage::default();
        assert_eq!(page.state, ResultState::AwaitingParams);
        assert!(page.status.visible);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn apply_renders_subjects_then_overall() {
        let mut page = ResultPage::default();
        page.apply(&mock_exam_body()).unwrap();

        assert_eq!(page.state, ResultState::Rendered);
        assert!(!page.status.visible);
        assert_eq!(page.exam_title, "Mock Exam");
        assert_eq!(page.candidate_name, "A");
        assert_eq!(page.candidate_roll, "1");
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0].cells(), ["Math", "1", "0", "1", "0", "4"]);
        assert!(!page.rows[0].highlighted);
        assert_eq!(page.rows[1].cells(), ["Overall", "1", "0", "1", "0", "4"]);
        assert!(page.rows[1].highlighted);
    }

    #[test]
    fn error_member_short_circuits() {
        let mut page = ResultPage::default();
        page.apply(&json!({"error": "Result not found", "exam": "ignored"}))
            .unwrap();
        assert_eq!(page.state, ResultState::ServiceError);
        assert_eq!(page.status.text, "Result not found");
        assert!(page.status.visible);
        assert!(page.exam_title.is_empty());
        assert!(page.rows.is_empty());
    }

    #[test]
    fn falsy_error_member_is_ignored() {
        let mut body = mock_exam_body();
        body["error"] = json!("");
        let mut page = ResultPage::default();
        page.apply(&body).unwrap();
        assert_eq!(page.state, ResultState::Rendered);

        body["error"] = Value::Null;
        let mut page = ResultPage::default();
        page.apply(&body).unwrap();
        assert_eq!(page.state, ResultState::Rendered);
    }

    #[test]
    fn malformed_body_keeps_partial_render() {
        let mut body = mock_exam_body();
        body.as_object_mut().unwrap().remove("overall");

        let mut page = ResultPage::default();
        let err = page.apply(&body).unwrap_err();
        assert!(matches!(err, RenderError::MissingField("overall")));
        assert_eq!(page.exam_title, "Mock Exam");
        assert_eq!(page.rows.len(), 1);
        assert!(!page.status.visible);
    }

    #[test]
    fn non_object_body_is_rejected_untouched() {
        let mut page = ResultPage::default();
        assert!(matches!(
            page.apply(&json!([1, 2])),
            Err(RenderError::NotAnObject)
        ));
        assert_eq!(page, ResultPage::default());
    }

    #[test]
    fn candidate_block_tolerates_any_values() {
        let mut body = mock_exam_body();
        body["candidate"] = json!({"name": 42, "roll": 1, "category": 3, "state": null});
        let mut page = ResultPage::default();
        page.apply(&body).unwrap();
        assert_eq!(page.state, ResultState::Rendered);
        assert_eq!(page.candidate_name, "42");
        assert_eq!(page.candidate_roll, "1");
        assert_eq!(page.rows.len(), 2);

        body["candidate"] = json!({"name": "A", "roll": "1", "category": 3, "gender": false});
        let mut page = ResultPage::default();
        page.apply(&body).unwrap();
        assert_eq!(page.candidate_name, "A");
    }

    #[test]
    fn candidate_must_be_an_object() {
        let mut body = mock_exam_body();
        body["candidate"] = json!("A");
        let mut page = ResultPage::default();
        let err = page.apply(&body).unwrap_err();
        assert!(matches!(err, RenderError::InvalidField { field: "candidate", .. }));
        assert_eq!(page.exam_title, "Mock Exam");
        assert!(page.candidate_name.is_empty());
    }

    #[test]
    fn placeholder_figures_render_as_text() {
        let mut body = mock_exam_body();
        body["subjects"][0]["attempt"] = json!("-");
        body["overall"]["marks"] = json!(3.75);
        let mut page = ResultPage::default();
        page.apply(&body).unwrap();
        assert_eq!(page.rows[0].figures.attempt, Figure::Text("-".into()));
        assert_eq!(page.rows[1].cells()[5], "3.75");
    }
}
