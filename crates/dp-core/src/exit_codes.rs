//! Exit codes for the dp-core CLI.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors

use dp_common::{Error, ErrorCategory};

/// Exit codes for dp-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success: estimate produced
    Clean = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments (unknown event, impossible outcome)
    ArgsError = 10,

    /// Settings file missing, malformed or invalid
    ConfigError = 11,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Numeric failure or other bug
    InternalError = 20,

    /// Plot or report could not be written
    IoError = 21,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err.category() {
            ErrorCategory::Input => ExitCode::ArgsError,
            ErrorCategory::Config => ExitCode::ConfigError,
            ErrorCategory::Inference => ExitCode::InternalError,
            ErrorCategory::Render => ExitCode::IoError,
            // Only serialization failures land here.
            ErrorCategory::Io => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::ArgsError.as_i32(), 10);
        assert_eq!(ExitCode::ConfigError.as_i32(), 11);
        assert_eq!(ExitCode::InternalError.as_i32(), 20);
        assert_eq!(ExitCode::IoError.as_i32(), 21);
    }

    #[test]
    fn test_from_error() {
        let unknown = Error::UnknownEvent { input: "x".into() };
        assert_eq!(ExitCode::from(&unknown), ExitCode::ArgsError);
        assert_eq!(
            ExitCode::from(&Error::InvalidSettings("grid".into())),
            ExitCode::ConfigError
        );
        assert_eq!(
            ExitCode::from(&Error::NumericalInstability("mass".into())),
            ExitCode::InternalError
        );
        assert_eq!(ExitCode::from(&Error::Render("svg".into())), ExitCode::IoError);
        let json = serde_json::from_str::<u8>("x").unwrap_err();
        assert_eq!(ExitCode::from(&Error::Json(json)), ExitCode::InternalError);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::ArgsError.to_string(), "ERR_ARGS (10)");
    }
}
