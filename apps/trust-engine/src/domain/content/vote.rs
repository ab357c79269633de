use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum VoteType {
    Like,
    Dislike,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Vote {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, Default, PartialEq, Eq)]
#[ts(export)]
pub struct VoteTally {
    pub likes: u32,
    pub dislikes: u32,
}

impl VoteTally {
    pub(crate) fn increment(&mut self, vote_type: VoteType) {
        match vote_type {
            VoteType::Like => self.likes = self.likes.saturating_add(1),
            VoteType::Dislike => self.dislikes = self.dislikes.saturating_add(1),
        }
    }

    pub(crate) fn decrement(&mut self, vote_type: VoteType) {
        match vote_type {
            VoteType::Like => self.likes = self.likes.saturating_sub(1),
            VoteType::Dislike => self.dislikes = self.dislikes.saturating_sub(1),
        }
    }
}

/// What a vote toggle did to the voter's standing on the item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum VoteOutcome {
    Added { vote_type: VoteType },
    Removed { vote_type: VoteType },
    Flipped { from: VoteType, to: VoteType },
}
