use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::ModerationStatus;
use super::vote::VoteOutcome;
use crate::domain::moderation::verdict::ModerationAction;
use crate::domain::report::entity::ReportReason;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ContentEvent {
    Submitted {
        content_id: Uuid,
        status: ModerationStatus,
        action: Option<ModerationAction>,
    },
    Edited {
        content_id: Uuid,
    },
    Voted {
        content_id: Uuid,
        user_id: Uuid,
        outcome: VoteOutcome,
    },
    Reported {
        content_id: Uuid,
        reporter_id: Uuid,
        reason: ReportReason,
    },
    Moderated {
        content_id: Uuid,
        moderator_id: Uuid,
        status: ModerationStatus,
    },
    Featured {
        content_id: Uuid,
        moderator_id: Uuid,
        featured: bool,
    },
}
