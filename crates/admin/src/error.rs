//! Unified error handling for admin.
//!
//! Error bodies are JSON: `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::FormError;
use crate::services::imgbb::UploadError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Submitted form failed validation.
    #[error(transparent)]
    Validation(#[from] FormError),

    /// Image upload failed.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Validation(_) | Self::Upload(UploadError::NoImage) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Session(_) | Self::Upload(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client.
    fn public_message(&self) -> String {
        match self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(RepositoryError::Conflict(msg))
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::BadRequest(msg) => msg.clone(),
            Self::Validation(err) => err.to_string(),
            Self::Upload(err) => err.public_message().to_string(),
            Self::Database(_) | Self::Session(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let body = Json(serde_json::json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an admin.
pub fn set_sentry_user(admin_id: i32, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Order not found".to_string());
        assert_eq!(err.to_string(), "Not found: Order not found");

        let err = AppError::BadRequest("Price must be greater than 0".to_string());
        assert_eq!(err.to_string(), "Bad request: Price must be greater than 0");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict("slug".to_string()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Validation(FormError::InvalidRating)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Upload(UploadError::NoImage)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Upload(UploadError::MissingApiKey)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_message_is_shown() {
        let err = AppError::Database(RepositoryError::Conflict(
            "A category with this slug already exists".to_string(),
        ));
        assert_eq!(err.public_message(), "A category with this slug already exists");

        let err = AppError::Upload(UploadError::MissingApiKey);
        assert_eq!(err.public_message(), "ImgBB API key not configured");

        let err = AppError::Validation(FormError::InvalidPrice);
        assert_eq!(err.public_message(), "Price must be greater than 0");
    }
}
