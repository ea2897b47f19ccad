//! Configuration validation errors.

use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Require a finite number.
pub(crate) fn require_finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            field,
            format!("Must be finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            ValidationError::IoError(String::new()),
            ValidationError::ParseError(String::new()),
            ValidationError::SemanticError(String::new()),
            ValidationError::MissingField(String::new()),
            ValidationError::invalid("f", "m"),
        ];
        let mut codes: Vec<u32> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_require_finite() {
        assert!(require_finite("grid.spacing", 0.5).is_ok());
        let err = require_finite("grid.spacing", f64::NAN).unwrap_err();
        assert!(err.to_string().contains("grid.spacing"));
    }
}
