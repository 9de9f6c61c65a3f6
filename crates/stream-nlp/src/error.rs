//! NLP-specific error types
//!
//! Classification itself never fails; these cover configuration and input
//! guards around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NlpError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl NlpError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::InvalidPattern(msg.into())
    }
}

/// Result type for NLP operations
pub type Result<T> = std::result::Result<T, NlpError>;

impl From<NlpError> for stream_core::AppError {
    fn from(err: NlpError) -> Self {
        match err {
            NlpError::Validation(msg) => stream_core::AppError::validation(msg),
            NlpError::InvalidPattern(msg) => stream_core::AppError::configuration(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stream_core::AppError;

    #[test]
    fn test_into_app_error() {
        let err: AppError = NlpError::validation("Input is too long").into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: Input is too long");

        let err: AppError = NlpError::invalid_pattern("Pattern cannot be empty").into();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
