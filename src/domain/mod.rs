//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `mcda` - Pure multi-criteria decision analysis (TOPSIS and diagnostics)

pub mod foundation;
pub mod mcda;
