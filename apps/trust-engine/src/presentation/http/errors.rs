//! HTTP error handling and response conversion.
//!
//! Engine failures are mapped to status codes and a JSON `{"error": ...}`
//! body. The log level follows the status: 5xx at error, client errors at warn.

use crate::domain::shared::errors::ModerationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// Malformed request (400).
    BadRequest(String),

    /// Missing or invalid credentials (401).
    Unauthorized(String),

    /// Authenticated but not allowed (403).
    Forbidden(String),

    /// Request data failed validation (400).
    ValidationError(String),

    /// Request conflicts with current state, e.g. a second report (409).
    Conflict(String),

    /// Content analyzer could not evaluate the request (503).
    ServiceUnavailable(String),

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Forbidden(msg)
            | Self::ValidationError(msg)
            | Self::Conflict(msg) => msg.clone(),
            Self::Unauthorized(_) => "Authentication required".into(),
            Self::ServiceUnavailable(_) => "Content analysis unavailable".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::SERVICE_UNAVAILABLE => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND
            | StatusCode::CONFLICT => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Domain Error Conversion ===

impl From<ModerationError> for AppError {
    fn from(err: ModerationError) -> Self {
        let message = err.to_string();
        match err {
            ModerationError::DuplicateReport | ModerationError::DuplicateEdit => {
                AppError::Conflict(message)
            }
            ModerationError::PermissionDenied(reason) => AppError::Forbidden(reason),
            ModerationError::AccountBlocked(_) => AppError::Forbidden(message),
            ModerationError::TargetNotFound(what) => AppError::NotFound(what),
            ModerationError::ValidationError(msg) => AppError::ValidationError(msg),
            ModerationError::InvalidSeverityInput(_) | ModerationError::InvalidTransition { .. } => {
                AppError::BadRequest(message)
            }
            ModerationError::AnalyzerUnavailable(msg) => AppError::ServiceUnavailable(msg),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(anyhow_error = %err, "Unclassified error with chain");
        err.chain().for_each(|cause| {
            tracing::error!(cause = %cause, "Error source");
        });
        AppError::Internal("Operation failed".into())
    }
}
