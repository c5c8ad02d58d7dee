//! Error types shared by the flows and the service implementations.
//!
//! `ServiceError` is defined here rather than in the client crate so the
//! flows can classify failures without knowing which transport produced them.

use thiserror::Error;

/// Errors that can occur when talking to the scoring service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be sent or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The service answered with a body we could not decode.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The service refused the request and said why.
    #[error("rejected by service (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// A request could not be built from the given inputs.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// A submission form with one or more required inputs missing.
///
/// Displays as the prompt shown to the operator; the missing fields are kept
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill all fields")]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// A result body that did not have the expected shape.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("result body is not a JSON object")]
    NotAnObject,

    #[error("missing field `{0}` in result body")]
    MissingField(&'static str),

    #[error("invalid `{field}` in result body: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
