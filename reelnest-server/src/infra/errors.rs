use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use reelnest_core::StoreError;
use reelnest_core::domain::{RelationError, ValidationError};

use crate::auth::crypto::AuthCryptoError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

// Convert from various error types
impl From<RelationError> for AppError {
    fn from(err: RelationError) -> Self {
        match err {
            RelationError::NotFound(msg) => Self::not_found(msg),
            RelationError::Forbidden(msg) => Self::forbidden(msg),
            RelationError::Conflict(msg) => Self::conflict(msg),
            RelationError::Validation(err) => err.into(),
            RelationError::Internal(err) => err.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = ?err, "store operation failed");
        Self::internal("Database operation failed")
    }
}

impl From<AuthCryptoError> for AppError {
    fn from(err: AuthCryptoError) -> Self {
        tracing::error!(error = ?err, "password hashing failed");
        Self::internal("Authentication failed")
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_errors_map_to_http_statuses() {
        let cases = [
            (RelationError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (RelationError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (RelationError::Conflict("again".into()), StatusCode::CONFLICT),
            (
                RelationError::Validation(ValidationError::EmptyPatch),
                StatusCode::BAD_REQUEST,
            ),
            (
                RelationError::Internal(StoreError::Internal("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn store_details_are_not_exposed() {
        let err = AppError::from(RelationError::Internal(StoreError::Internal(
            "relation \"videos\" does not exist".into(),
        )));
        assert_eq!(err.message, "Database operation failed");
    }
}
