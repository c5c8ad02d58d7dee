//! examportal-client — scoring service integrations.
//!
//! Implements the `ScoringService` trait over HTTP, plus an in-memory mock,
//! and loads the client configuration.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{create_service, load_config, ExamportalConfig};
pub use http::HttpScoringService;
pub use mock::MockScoringService;
