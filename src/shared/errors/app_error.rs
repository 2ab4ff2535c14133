use super::lookup_error::LookupError;
use serde::Serialize;
use thiserror::Error;

/// Run-level failures. A single query's failure never becomes an `AppError`
/// except for authentication, which would recur for every later call.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Authentication(msg) => AppError::Unauthorized(msg),
            other => AppError::ExternalServiceError(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::SerializationError(format!("CSV: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ConfigError(format!("Invalid number: {}", err))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(err: std::num::ParseFloatError) -> Self {
        AppError::ConfigError(format!("Invalid decimal number: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_escalates_to_unauthorized() {
        let err: AppError = LookupError::Authentication("API key not valid".to_string()).into();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_other_lookup_errors_become_external_service_errors() {
        let err: AppError = LookupError::Network("connection reset".to_string()).into();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(AppError::ConfigError("missing key".to_string())).unwrap();
        assert_eq!(json["type"], "ConfigError");
        assert_eq!(json["message"], "missing key");
    }
}
