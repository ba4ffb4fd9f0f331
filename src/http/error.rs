//! HTTP error handling and response types.
//!
//! Two error kinds are part of the API contract: a missing record by id is a
//! 404 with `{"error": ...}`, and a write rejected by a constraint is a 400
//! with `{"errors": [...]}` carrying a generic, non-field-specific message.
//! Anything else is a 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::repository::RepositoryError;

/// The generic body every rejected write receives, regardless of which
/// constraint failed.
const VALIDATION_MESSAGE: &str = "validation errors";

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Write rejected by a declared constraint
    Validation(Vec<String>),
    /// Internal server error
    Internal(String),
}

impl AppError {
    pub fn validation() -> Self {
        AppError::Validation(vec![VALIDATION_MESSAGE.to_string()])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": message })),
            )
                .into_response(),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            AppError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { message, .. } => AppError::NotFound(message),
            RepositoryError::ValidationError { message, context } => {
                // The wire message stays generic; the specific constraint is
                // only logged.
                tracing::debug!(%message, %context, "write rejected by constraint");
                AppError::validation()
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Scientist not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::validation().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_repository_validation_error_is_generic() {
        let err = RepositoryError::validation("name must be unique");
        match AppError::from(err) {
            AppError::Validation(errors) => assert_eq!(errors, vec!["validation errors"]),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
