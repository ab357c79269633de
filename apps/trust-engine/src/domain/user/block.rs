use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account block (suspension or ban) issued by a moderator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserBlock {
    pub user_id: Uuid,
    pub reason: String,
    pub moderator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    /// `None` together with `is_permanent` means the block never lapses
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_permanent: bool,
}

impl UserBlock {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Permanent,
    Temporary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockStatus {
    pub is_blocked: bool,
    pub block_type: Option<BlockType>,
    pub reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub moderator_id: Option<Uuid>,
    /// Milliseconds until a temporary block lapses
    pub remaining_ms: Option<i64>,
}

impl BlockStatus {
    fn unblocked() -> Self {
        Self {
            is_blocked: false,
            block_type: None,
            reason: None,
            expires_at: None,
            moderator_id: None,
            remaining_ms: None,
        }
    }
}

/// Resolves the most restrictive active block for `user_id`.
///
/// Expired blocks are ignored and permanent blocks win over temporary ones.
pub fn check_block_status(user_id: Uuid, blocks: &[UserBlock], now: DateTime<Utc>) -> BlockStatus {
    let mut active: Vec<&UserBlock> = blocks
        .iter()
        .filter(|block| block.user_id == user_id && block.is_active(now))
        .collect();

    active.sort_by_key(|block| !block.is_permanent);

    let Some(block) = active.first() else {
        return BlockStatus::unblocked();
    };

    let remaining_ms = if block.is_permanent {
        None
    } else {
        block
            .expires_at
            .map(|expires_at| (expires_at - now).num_milliseconds().max(0))
    };

    BlockStatus {
        is_blocked: true,
        block_type: Some(if block.is_permanent {
            BlockType::Permanent
        } else {
            BlockType::Temporary
        }),
        reason: Some(block.reason.clone()),
        expires_at: block.expires_at,
        moderator_id: block.moderator_id,
        remaining_ms,
    }
}
