//! Client error types

use shared::{AppError, ErrorCode, ResourceKind};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error body returned by the database API
    #[error("API error {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    /// API key missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No row matched the id filter
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Payload written to a table of another kind
    #[error("Payload for {actual} cannot be written to {expected}")]
    KindMismatch {
        expected: ResourceKind,
        actual: ResourceKind,
    },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend could not be reached
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match &err {
            ClientError::NotFound(what) => AppError::not_found(what.clone()),
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, err.to_string())
            }
            ClientError::Http(_) | ClientError::Unavailable(_) => {
                AppError::with_message(ErrorCode::NetworkError, err.to_string())
            }
            ClientError::Config(_) | ClientError::Unauthorized(_) => {
                AppError::with_message(ErrorCode::ConfigError, err.to_string())
            }
            ClientError::KindMismatch { .. } => AppError::internal(err.to_string()),
            ClientError::Api { .. }
            | ClientError::InvalidResponse(_)
            | ClientError::Serialization(_) => AppError::database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_mapping() {
        let err: AppError = ClientError::NotFound("chefs c9".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: AppError = ClientError::Unavailable("connection refused".into()).into();
        assert_eq!(err.code, ErrorCode::NetworkError);

        let err: AppError = ClientError::Api {
            status: 409,
            code: "23505".into(),
            message: "duplicate key value".into(),
            details: None,
            hint: None,
        }
        .into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
