//! Application-wide error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::validation("input too long");
        assert_eq!(err.to_string(), "Validation error: input too long");

        let err = AppError::configuration("unknown field");
        assert_eq!(err.to_string(), "Configuration error: unknown field");
    }

    #[test]
    fn test_from_config_error() {
        let err: AppError = ::config::ConfigError::Message("bad key".to_string()).into();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
