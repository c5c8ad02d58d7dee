//! Result locations: how the submission stage hands off to the result stage.
//!
//! A location is carried explicitly as `<page>?exam=..&roll=..` rather than
//! through any shared storage.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Page the submission flow navigates to by default.
pub const DEFAULT_RESULT_PAGE: &str = "result.html";

/// The (exam, roll) pair that addresses one result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultLocation {
    /// Exam key as the service stores it (spaces already replaced by `_`).
    pub exam: String,
    pub roll: String,
}

impl ResultLocation {
    /// Location for a freshly submitted candidate.
    pub fn for_submission(exam_name: &str, roll: &str) -> Self {
        Self {
            exam: exam_key(exam_name),
            roll: roll.to_string(),
        }
    }

    /// Parse a query string such as `exam=Mock_Exam&roll=1`.
    ///
    /// Returns `None` if either parameter is absent or empty.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let exam = first_param(query, "exam")?;
        let roll = first_param(query, "roll")?;
        Some(Self { exam, roll })
    }

    /// Parse a full or relative href such as `result.html?exam=X&roll=1`.
    ///
    /// Input without a `?` is treated as a bare query string.
    pub fn from_href(href: &str) -> Option<Self> {
        let href = href.split_once('#').map_or(href, |(before, _)| before);
        let query = href.split_once('?').map_or(href, |(_, q)| q);
        Self::from_query(query)
    }

    /// The encoded query string, without a leading `?`.
    pub fn query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("exam", &self.exam)
            .append_pair("roll", &self.roll)
            .finish()
    }

    /// Href of the result page for this location.
    pub fn href(&self, page: &str) -> String {
        format!("{page}?{}", self.query())
    }
}

fn first_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Storage key of an exam: every space becomes `_`.
pub fn exam_key(exam_name: &str) -> String {
    exam_name.replace(' ', "_")
}

/// Display title of an exam key: every `_` becomes a space.
pub fn display_exam_title(exam: &str) -> String {
    exam.replace('_', " ")
}
