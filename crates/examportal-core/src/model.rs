//! Core data model types for examportal.
//!
//! Submissions are built on the client and sent once; result records and
//! exam summaries are what the scoring service sends back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// A numeric cell as reported by the scoring service.
///
/// Counts are integers, marks may be fractional under negative marking, and
/// the service reports `"-"` for statistics it never recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Figure::Int(n) => write!(f, "{n}"),
            // f64's Display already drops a zero fraction (4.0 -> "4").
            Figure::Float(x) => write!(f, "{x}"),
            Figure::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Figure {
    fn from(n: i64) -> Self {
        Figure::Int(n)
    }
}

impl From<f64> for Figure {
    fn from(x: f64) -> Self {
        Figure::Float(x)
    }
}

impl From<&str> for Figure {
    fn from(s: &str) -> Self {
        Figure::Text(s.to_string())
    }
}

/// The uploaded answer sheet.
#[derive(Clone)]
pub struct AnswerFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AnswerFile {
    /// Wrap file contents, guessing the content type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

impl fmt::Debug for AnswerFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// A validated candidate submission, ready to send.
///
/// All text fields are trimmed and non-empty.
#[derive(Debug, Clone)]
pub struct CandidateSubmission {
    pub exam_name: String,
    pub name: String,
    pub roll: String,
    pub category: String,
    pub gender: String,
    pub state: String,
    pub file: AnswerFile,
}

impl CandidateSubmission {
    /// The text fields in wire order, keyed by their form field names.
    pub fn text_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("exam_name", &self.exam_name),
            ("name", &self.name),
            ("roll", &self.roll),
            ("category", &self.category),
            ("gender", &self.gender),
            ("state", &self.state),
        ]
    }
}

/// What the service said about an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAck {
    pub status: u16,
    pub body: String,
}

impl SubmitAck {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The candidate block of a result record.
///
/// Spreadsheet storage can hand back any of these as numbers, so nothing
/// here is pinned to a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: Figure,
    pub roll: Figure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
}

/// Per-subject statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub name: String,
    pub attempt: Figure,
    pub na: Figure,
    pub right: Figure,
    pub wrong: Figure,
    pub marks: Figure,
}

/// Totals across all subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub attempt: Figure,
    pub na: Figure,
    pub right: Figure,
    pub wrong: Figure,
    pub marks: Figure,
}

/// A scored result for one candidate in one exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub exam: String,
    pub candidate: Candidate,
    pub subjects: Vec<SubjectEntry>,
    pub overall: Aggregate,
}

/// One exam known to the service, with its marking scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSummary {
    #[serde(default)]
    pub exam_name: Option<String>,
    #[serde(default)]
    pub correct: Option<Figure>,
    #[serde(default)]
    pub wrong: Option<Figure>,
    #[serde(default)]
    pub na: Option<Figure>,
}

/// A request to create an exam with a marking scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExam {
    pub exam_name: String,
    /// Marks awarded per correct answer.
    pub correct: f64,
    /// Marks awarded per wrong answer (usually negative).
    pub wrong: f64,
    /// Marks awarded per unanswered question.
    pub na: f64,
}
