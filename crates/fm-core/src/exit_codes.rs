//! Exit codes for the fm-core CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use fm_common::{Error, ErrorCategory};

/// Exit codes for fm-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Configuration missing, unreadable or invalid
    ConfigError = 11,

    /// Fire document malformed or rejected by validation
    InputError = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Check if this exit code is an internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Get the code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Map an engine error onto its exit code.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::Json(_) => ExitCode::InputError,
            _ => match err.category() {
                ErrorCategory::Config => ExitCode::ConfigError,
                ErrorCategory::Input | ErrorCategory::Merge => ExitCode::InputError,
                ErrorCategory::Io => ExitCode::IoError,
            },
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
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
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::ArgsError.as_i32(), 10);
        assert_eq!(ExitCode::ConfigError.as_i32(), 11);
        assert_eq!(ExitCode::InputError.as_i32(), 12);
        assert_eq!(ExitCode::InternalError.as_i32(), 20);
        assert_eq!(ExitCode::IoError.as_i32(), 21);
    }

    #[test]
    fn test_exit_code_ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(ExitCode::ConfigError.is_user_error());
        assert!(!ExitCode::ConfigError.is_internal_error());
        assert!(ExitCode::IoError.is_internal_error());
    }

    #[test]
    fn test_for_error() {
        assert_eq!(ExitCode::for_error(&Error::NoTimeWindows), ExitCode::ConfigError);
        assert_eq!(
            ExitCode::for_error(&Error::ConsumptionShapeMismatch { key: "x".into() }),
            ExitCode::InputError
        );
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(ExitCode::for_error(&io), ExitCode::IoError);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::InputError.to_string(), "ERR_INPUT (12)");
    }
}
