use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::content::entity::ModerationStatus;

/// Expected, recoverable failures of the moderation engine.
///
/// None of these are process-fatal. Callers decide the user-facing message;
/// the HTTP sidecar maps them through `AppError`.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum ModerationError {
    #[error("Reporter has already reported this content")]
    DuplicateReport,
    #[error("Content can only be edited once")]
    DuplicateEdit,
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Target not found: {0}")]
    TargetNotFound(String),
    #[error("Invalid severity input: {0}")]
    InvalidSeverityInput(String),
    #[error("Content analyzer unavailable: {0}")]
    AnalyzerUnavailable(String),
    #[error("Invalid moderation transition from {from} to {to}")]
    InvalidTransition {
        from: ModerationStatus,
        to: ModerationStatus,
    },
    #[error("Account blocked: {0}")]
    AccountBlocked(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<validator::ValidationErrors> for ModerationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ModerationError::ValidationError(errors.to_string())
    }
}
