//! Service-layer error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use orthocheck_core::CoreError;
use orthocheck_storage::StorageError;

/// Errors surfaced by the category and spell-check services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller supplied an argument the service refuses to act on.
    /// Rejected before any storage or cache access.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CoreError),

    /// The requested entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: i64 },

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl ServiceError {
    #[must_use]
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

// Storage misses keep their entity and id so the HTTP layer can answer 404
// instead of a blanket 500.
impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Storage(other),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "invalid-argument"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "not-found"),
            Self::Storage(err) => {
                tracing::error!(category = %err.category(), error = %err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage")
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        });

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_converts_to_invalid_argument() {
        let err: ServiceError = CoreError::invalid_id(0).into();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("invalid argument"));
    }

    #[test]
    fn test_storage_not_found_converts_to_not_found() {
        let err: ServiceError = StorageError::not_found("category", 7).into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "category with id 7 not found");
    }

    #[test]
    fn test_storage_internal_stays_storage() {
        let err: ServiceError = StorageError::internal("disk on fire").into();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[test]
    fn test_http_status_mapping() {
        let invalid: ServiceError = CoreError::invalid_id(-1).into();
        assert_eq!(
            invalid.into_response().status(),
            StatusCode::BAD_REQUEST
        );

        let missing = ServiceError::not_found("spell check", 42);
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let storage = ServiceError::Storage(StorageError::internal("boom"));
        assert_eq!(
            storage.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
