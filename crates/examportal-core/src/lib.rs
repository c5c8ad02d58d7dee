//! examportal-core — data model, validation, and the two client flows.
//!
//! This crate defines the submission and result-retrieval workflows of the
//! exam portal client, independent of any particular transport.

pub mod error;
pub mod model;
pub mod navigation;
pub mod result_page;
pub mod submission;
pub mod traits;
