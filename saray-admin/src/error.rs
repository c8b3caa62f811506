//! Admin error types

use saray_client::ClientError;
use shared::{ErrorCode, ResourceKind};
use thiserror::Error;

use crate::validation::ValidationError;

/// Admin panel error type
///
/// Every variant is terminal for the operation that produced it and leaves
/// the panel usable.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Form input rejected before any remote call
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Any select/insert/update/delete failure
    #[error("Remote operation failed: {0}")]
    Remote(#[from] ClientError),

    /// Wrong admin password
    #[error("Wrong password")]
    AuthFailed,

    /// Panel used without a session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Reservations are listed only
    #[error("{0} are read-only")]
    ReadOnly(ResourceKind),

    #[error("No form is open")]
    NoOpenForm,

    /// Open form belongs to another kind
    #[error("Open form is for {open}, not {requested}")]
    FormKindMismatch {
        open: ResourceKind,
        requested: ResourceKind,
    },

    /// Operation names a kind other than the displayed tab
    #[error("{requested} is not the active tab ({active})")]
    NotActiveTab {
        active: ResourceKind,
        requested: ResourceKind,
    },

    #[error("Unknown field '{field}' for {kind}")]
    UnknownField { kind: ResourceKind, field: String },

    /// Edit target not in the displayed collection
    #[error("No {kind} record with id {id}")]
    RecordNotFound { kind: ResourceKind, id: String },

    /// Session storage could not be read or written
    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;

impl AdminError {
    /// Shared error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) => e.code(),
            Self::Remote(ClientError::NotFound(_)) => ErrorCode::NotFound,
            Self::Remote(ClientError::Http(_) | ClientError::Unavailable(_)) => {
                ErrorCode::NetworkError
            }
            Self::Remote(_) => ErrorCode::DatabaseError,
            Self::AuthFailed => ErrorCode::InvalidCredentials,
            Self::NotAuthenticated => ErrorCode::NotAuthenticated,
            Self::ReadOnly(_) => ErrorCode::ReservationReadOnly,
            Self::NoOpenForm
            | Self::FormKindMismatch { .. }
            | Self::NotActiveTab { .. }
            | Self::UnknownField { .. } => ErrorCode::InvalidRequest,
            Self::RecordNotFound { kind, .. } => kind.not_found_code(),
            Self::Session(_) => ErrorCode::InternalError,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_code_follows_kind() {
        let err = AdminError::RecordNotFound {
            kind: ResourceKind::Chefs,
            id: "c9".into(),
        };
        assert_eq!(err.code(), ErrorCode::ChefNotFound);
        let err = AdminError::NotActiveTab {
            active: ResourceKind::Tables,
            requested: ResourceKind::Chefs,
        };
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
