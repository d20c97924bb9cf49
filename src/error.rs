//! Error types for the order resolver
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failures reported by a key-value table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The table could not be reached
    #[error("Table {table} unavailable: {reason}")]
    Unavailable { table: String, reason: String },

    /// The key is not usable (e.g. empty)
    #[error("Invalid key for table {table}: {reason}")]
    InvalidKey { table: String, reason: String },
}

// == Resolver Error Enum ==
/// Unified error type for the resolver service.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The request named a field this resolver does not serve
    #[error("Unknown field \"{0}\"")]
    UnknownField(String),

    /// A required argument was absent or empty
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// An argument was present but malformed
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Upstream table failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ResolverError {
    fn into_response(self) -> Response {
        let status = match &self {
            ResolverError::UnknownField(_)
            | ResolverError::MissingArgument(_)
            | ResolverError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ResolverError::Store(StoreError::Unavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ResolverError::Store(StoreError::InvalidKey { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the resolver.
pub type Result<T> = std::result::Result<T, ResolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_message() {
        let err = ResolverError::UnknownField("customers".to_string());
        assert_eq!(err.to_string(), "Unknown field \"customers\"");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ResolverError::MissingArgument("email"), StatusCode::BAD_REQUEST),
            (
                ResolverError::Store(StoreError::Unavailable {
                    table: "products".to_string(),
                    reason: "down".to_string(),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ResolverError::Store(StoreError::InvalidKey {
                    table: "products".to_string(),
                    reason: "empty key".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: ResolverError = StoreError::Unavailable {
            table: "orders".to_string(),
            reason: "timeout".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Table orders unavailable: timeout");
    }
}
