//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types shared by the
//! analysis engine and its callers.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::AnalysisId;
pub use timestamp::Timestamp;
