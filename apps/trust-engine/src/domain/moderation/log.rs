use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::content::entity::ModerationStatus;
use crate::domain::moderation::verdict::{ModerationAction, Severity};
use crate::domain::report::entity::TargetType;
use crate::domain::user::role::{Actor, Role};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    Approve,
    Reject,
    Hide,
    Warn,
    Censor,
    DeleteContent,
    SuspendUser,
}

impl LogAction {
    pub fn for_status(status: ModerationStatus) -> Option<Self> {
        match status {
            ModerationStatus::Approved => Some(LogAction::Approve),
            ModerationStatus::Rejected => Some(LogAction::Reject),
            ModerationStatus::Hidden => Some(LogAction::Hide),
            ModerationStatus::Pending => None,
        }
    }

    pub fn for_action(action: ModerationAction) -> Option<Self> {
        match action {
            ModerationAction::None => None,
            ModerationAction::Warn => Some(LogAction::Warn),
            ModerationAction::Censor => Some(LogAction::Censor),
            ModerationAction::Hide => Some(LogAction::Hide),
            ModerationAction::DeleteContent => Some(LogAction::DeleteContent),
            ModerationAction::SuspendUser => Some(LogAction::SuspendUser),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogModerator {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl From<&Actor> for LogModerator {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            username: actor.username.clone(),
            role: actor.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogTarget {
    #[serde(rename = "type")]
    pub target_type: TargetType,
    pub id: Uuid,
}

/// Client metadata attached to an audit entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RequestContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Audit record of one moderation action, persisted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModerationLogEntry {
    pub timestamp: DateTime<Utc>,
    pub moderator: LogModerator,
    pub action: LogAction,
    pub target: LogTarget,
    pub reason: String,
    pub severity: Severity,
    pub details: serde_json::Value,
    pub ip: String,
    pub user_agent: String,
}

impl ModerationLogEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        moderator: &Actor,
        action: LogAction,
        target: LogTarget,
        reason: impl Into<String>,
        severity: Severity,
        details: serde_json::Value,
        context: &RequestContext,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: now,
            moderator: LogModerator::from(moderator),
            action,
            target,
            reason: reason.into(),
            severity,
            details,
            ip: context.ip.clone().unwrap_or_else(|| "unknown".to_string()),
            user_agent: context
                .user_agent
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}
