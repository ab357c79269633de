use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Closed set of account roles used by the moderation hierarchy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Moderators and admins both carry moderation privileges.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }
}

/// The user performing an action, as seen by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Actor {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl Actor {
    /// Identity recorded for decisions the engine takes on its own.
    pub fn system() -> Self {
        Self {
            id: Uuid::nil(),
            username: "system".to_string(),
            role: Role::Admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ModerationPermission {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl ModerationPermission {
    fn granted() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn denied(reason: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Role hierarchy check for human moderation.
///
/// Admins moderate everyone. Moderators moderate regular users only.
/// `target` is the role of the content author or user being acted on, when known.
pub fn can_moderate(actor: Option<&Actor>, target: Option<Role>) -> ModerationPermission {
    let Some(actor) = actor else {
        return ModerationPermission::denied("User is not authenticated");
    };

    if !actor.role.is_staff() {
        return ModerationPermission::denied("User lacks moderation permissions");
    }

    if actor.role != Role::Admin && target.is_some_and(|role| role.is_staff()) {
        return ModerationPermission::denied("Moderators cannot moderate other moderators");
    }

    ModerationPermission::granted()
}
