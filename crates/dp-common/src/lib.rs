//! Dice Posterior common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - Common error types with stable codes
//! - Output format specifications
//! - Report schema versioning

pub mod error;
pub mod output;

pub use error::{Error, ErrorCategory, Result, StructuredError, SuggestedAction};
pub use output::OutputFormat;

/// Schema version of the estimate report emitted on stdout.
pub const SCHEMA_VERSION: &str = "1.0.0";
