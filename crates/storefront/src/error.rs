//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Error bodies are JSON: `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::cart::CartInputError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Session store failed (cart storage).
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Add-to-cart input rejected.
    #[error(transparent)]
    Cart(#[from] CartInputError),

    /// Checkout input rejected.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

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
            Self::Database(RepositoryError::NotFound)
            | Self::Cart(CartInputError::ProductNotFound)
            | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Cart(_) | Self::Checkout(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to the client.
    fn public_message(&self) -> String {
        match self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(_) | Self::Session(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Cart(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<std::convert::Infallible> for AppError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(serde_json::json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use shilpini_core::PhoneError;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Not found: Product not found");

        let err = AppError::Checkout(CheckoutError::Phone(PhoneError::MissingPrefix));
        assert_eq!(err.to_string(), "Phone number must start with 01");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Cart(CartInputError::ProductNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Cart(CartInputError::OutOfStock)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict("slug".to_string()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::Database(RepositoryError::DataCorruption("bad row 7".to_string()));
        assert_eq!(err.public_message(), "Internal server error");

        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.public_message(), "Your cart is empty");
    }
}
