//! Error types for Dice Posterior.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation suggestions for humans
//! - Suggested actions for scripted callers
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Unknown Event
//!   Reason: unknown event: "Sum >= 99"
//!   Fix: Run 'dp-core events' to list the supported events.
//! ```
//!
//! # Machine-Facing Output
//!
//! ```json
//! {
//!   "code": 40,
//!   "category": "input",
//!   "message": "unknown event: \"Sum >= 99\"",
//!   "recoverable": true,
//!   "suggested_action": "list_events",
//!   "context": { "input": "Sum >= 99" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Dice Posterior operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Settings file errors.
    Config,
    /// Posterior computation and numerical errors.
    Inference,
    /// Caller-supplied selections and observations.
    Input,
    /// Figure rendering errors.
    Render,
    /// Report serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Inference => write!(f, "inference"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Render => write!(f, "render"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Suggested actions for scripted callers to take in response to errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Retry the operation.
    Retry,
    /// Run settings validation.
    RunCheck,
    /// Reset settings to defaults.
    ResetConfig,
    /// List the supported events and pick one of them.
    ListEvents,
    /// Correct the supplied arguments.
    FixInput,
    /// Manual intervention required.
    ManualIntervention,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::Retry => write!(f, "retry"),
            SuggestedAction::RunCheck => write!(f, "run_check"),
            SuggestedAction::ResetConfig => write!(f, "reset_config"),
            SuggestedAction::ListEvents => write!(f, "list_events"),
            SuggestedAction::FixInput => write!(f, "fix_input"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
        }
    }
}

/// Unified error type for Dice Posterior.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    // Inference errors (30-39)
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("numerical instability detected: {0}")]
    NumericalInstability(String),

    // Input errors (40-49)
    #[error("unknown event: {input:?}")]
    UnknownEvent { input: String },

    #[error("invalid trial outcome: {successes} successes in {trials} trials")]
    InvalidOutcome { successes: u64, trials: u64 },

    #[error("invalid prior: alpha={alpha}, beta={beta}")]
    InvalidPrior { alpha: f64, beta: f64 },

    // Render errors (50-59)
    #[error("rendering failed: {0}")]
    Render(String),

    // Serialization errors (60-69)
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 30-39: Inference errors
    /// - 40-49: Input errors
    /// - 50-59: Render errors
    /// - 60-69: Serialization errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidSettings(_) => 11,
            Error::Inference(_) => 30,
            Error::NumericalInstability(_) => 31,
            Error::UnknownEvent { .. } => 40,
            Error::InvalidOutcome { .. } => 41,
            Error::InvalidPrior { .. } => 42,
            Error::Render(_) => 50,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidSettings(_) => ErrorCategory::Config,
            Error::Inference(_) | Error::NumericalInstability(_) => ErrorCategory::Inference,
            Error::UnknownEvent { .. } | Error::InvalidOutcome { .. } | Error::InvalidPrior { .. } => {
                ErrorCategory::Input
            }
            Error::Render(_) => ErrorCategory::Render,
            Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) | Error::InvalidSettings(_) => true,
            // A numeric failure means the configuration cannot produce a posterior.
            Error::Inference(_) | Error::NumericalInstability(_) => false,
            Error::UnknownEvent { .. } | Error::InvalidOutcome { .. } | Error::InvalidPrior { .. } => {
                true
            }
            Error::Render(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns the suggested action for scripted callers.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::Config(_) => SuggestedAction::RunCheck,
            Error::InvalidSettings(_) => SuggestedAction::ResetConfig,
            Error::Inference(_) | Error::NumericalInstability(_) => {
                SuggestedAction::ManualIntervention
            }
            Error::UnknownEvent { .. } => SuggestedAction::ListEvents,
            Error::InvalidOutcome { .. } | Error::InvalidPrior { .. } => SuggestedAction::FixInput,
            Error::Render(_) => SuggestedAction::Retry,
            Error::Json(_) => SuggestedAction::ManualIntervention,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => "Run 'dp-core config validate' to check the settings file.",
            Error::InvalidSettings(_) => {
                "Fix the reported field in settings.json, or remove the file to use built-in defaults."
            }
            Error::Inference(_) => {
                "The posterior could not be computed for these inputs. Check grid_points and prior_scale."
            }
            Error::NumericalInstability(_) => {
                "All posterior mass vanished on the grid. Increase grid_points or loosen the prior."
            }
            Error::UnknownEvent { .. } => "Run 'dp-core events' to list the supported events.",
            Error::InvalidOutcome { .. } => {
                "Successes must lie between 0 and the number of trials, and trials must be at least 1."
            }
            Error::InvalidPrior { .. } => "Both prior shape parameters must be finite and positive.",
            Error::Render(_) => "Check that the plot path is writable and retry.",
            Error::Json(_) => "Invalid JSON. Check syntax with 'jq .' or restore from backup.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidSettings(_) => "Invalid Settings",
            Error::Inference(_) => "Inference Error",
            Error::NumericalInstability(_) => "Numerical Instability",
            Error::UnknownEvent { .. } => "Unknown Event",
            Error::InvalidOutcome { .. } => "Invalid Trial Outcome",
            Error::InvalidPrior { .. } => "Invalid Prior",
            Error::Render(_) => "Rendering Failed",
            Error::Json(_) => "JSON Error",
        }
    }
}

/// Structured error payload for machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Suggested action for scripted callers.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g., offending input).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::UnknownEvent { input } => {
                context.insert("input".to_string(), serde_json::json!(input));
            }
            Error::InvalidOutcome { successes, trials } => {
                context.insert("successes".to_string(), serde_json::json!(successes));
                context.insert("trials".to_string(), serde_json::json!(trials));
            }
            Error::InvalidPrior { alpha, beta } => {
                context.insert("alpha".to_string(), serde_json::json!(alpha));
                context.insert("beta".to_string(), serde_json::json!(beta));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
