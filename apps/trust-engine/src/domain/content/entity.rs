use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use super::vote::{Vote, VoteOutcome, VoteTally, VoteType};
use crate::domain::moderation::verdict::ModerationAction;
use crate::domain::report::entity::{ReportReason, TargetType};
use crate::domain::shared::errors::ModerationError;
use crate::domain::user::role::{Actor, Role, can_moderate};

/// A moderatable unit of user-submitted text.
///
/// Every state change returns a new item; the persistence layer is expected to
/// apply the returned snapshot atomically (vote list and tally together, and the
/// one-report / one-edit checks under a uniqueness constraint).
///
/// # Invariants
/// - `is_edited` flips from false to true exactly once
/// - a user holds at most one vote and one report per item
/// - `vote_count` always matches the `votes` list
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ContentItem {
    pub id: Uuid,
    pub kind: ContentKind,
    pub author_id: Uuid,
    pub title: Option<String>,
    pub content: String,
    pub status: ModerationStatus,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub edit_history: Vec<EditRecord>,
    #[serde(default)]
    pub vote_count: VoteTally,
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[serde(default)]
    pub reports: Vec<ReportEntry>,
    /// Parent item for threaded replies
    pub parent_id: Option<Uuid>,
    /// Star rating for reviews (1-5)
    pub rating: Option<u8>,
    #[serde(default)]
    pub moderation: Option<ModerationRecord>,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ContentKind {
    Comment,
    Reply,
    Review,
    Thread,
}

impl ContentKind {
    pub fn target_type(&self) -> TargetType {
        match self {
            ContentKind::Comment | ContentKind::Reply => TargetType::Comment,
            ContentKind::Review => TargetType::Review,
            ContentKind::Thread => TargetType::Thread,
        }
    }
}

/// Moderation and visibility status of a content item.
///
/// `rejected` and `hidden` are terminal for the automated path; only a human
/// moderator moves an item out of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ModerationStatus {
    /// Awaiting manual review
    #[default]
    Pending,
    /// Publicly visible
    Approved,
    /// Refused by a moderator
    Rejected,
    /// Removed from public view
    Hidden,
}

impl ModerationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ModerationStatus::Rejected | ModerationStatus::Hidden)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
            ModerationStatus::Hidden => "hidden",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-edit snapshot archived by the single permitted edit.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct EditRecord {
    pub previous_title: Option<String>,
    pub previous_content: String,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ReportEntry {
    pub reporter_id: Uuid,
    pub reason: ReportReason,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ModerationRecord {
    /// `None` for automated decisions
    pub moderated_by: Option<Uuid>,
    pub moderated_at: DateTime<Utc>,
    pub reason: String,
}

impl ContentItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        kind: ContentKind,
        author_id: Uuid,
        title: Option<String>,
        content: String,
        parent_id: Option<Uuid>,
        rating: Option<u8>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            author_id,
            title,
            content,
            status: ModerationStatus::Pending,
            is_edited: false,
            edited_at: None,
            edit_history: Vec::new(),
            vote_count: VoteTally::default(),
            votes: Vec::new(),
            reports: Vec::new(),
            parent_id,
            rating,
            moderation: None,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an automated moderation action.
    ///
    /// Visible actions approve the item (`censor` also swaps in `censored`),
    /// removal actions hide it. Items already rejected or hidden stay put.
    pub fn apply_action(
        &self,
        action: ModerationAction,
        censored: Option<&str>,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ModerationError> {
        let target = if action.keeps_visible() {
            ModerationStatus::Approved
        } else {
            ModerationStatus::Hidden
        };

        if self.status.is_terminal() {
            return Err(ModerationError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        let mut next = self.clone();
        next.status = target;
        if action == ModerationAction::Censor {
            if let Some(censored) = censored {
                next.content = censored.to_string();
            }
        }
        if action != ModerationAction::None {
            next.moderation = Some(ModerationRecord {
                moderated_by: None,
                moderated_at: now,
                reason: reason.to_string(),
            });
        }
        next.updated_at = now;
        Ok(next)
    }

    /// The one permitted edit. The previous title and body are archived first.
    pub fn edit(
        &self,
        title: Option<String>,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<Self, ModerationError> {
        if self.is_edited {
            return Err(ModerationError::DuplicateEdit);
        }

        let mut next = self.clone();
        next.edit_history.push(EditRecord {
            previous_title: self.title.clone(),
            previous_content: self.content.clone(),
            edited_at: now,
        });
        next.title = title;
        next.content = content;
        next.is_edited = true;
        next.edited_at = Some(now);
        next.updated_at = now;
        Ok(next)
    }

    pub fn user_vote(&self, user_id: Uuid) -> Option<VoteType> {
        self.votes
            .iter()
            .find(|vote| vote.user_id == user_id)
            .map(|vote| vote.vote_type)
    }

    /// Toggles a vote: same type removes it, opposite type flips it.
    pub fn vote(&self, user_id: Uuid, vote_type: VoteType, now: DateTime<Utc>) -> (Self, VoteOutcome) {
        let mut next = self.clone();
        let existing = next.votes.iter().position(|vote| vote.user_id == user_id);

        let outcome = match existing {
            Some(index) if next.votes[index].vote_type == vote_type => {
                next.votes.remove(index);
                next.vote_count.decrement(vote_type);
                VoteOutcome::Removed { vote_type }
            }
            Some(index) => {
                let from = next.votes[index].vote_type;
                next.votes[index].vote_type = vote_type;
                next.vote_count.decrement(from);
                next.vote_count.increment(vote_type);
                VoteOutcome::Flipped { from, to: vote_type }
            }
            None => {
                next.votes.push(Vote {
                    user_id,
                    vote_type,
                    created_at: now,
                });
                next.vote_count.increment(vote_type);
                VoteOutcome::Added { vote_type }
            }
        };

        next.updated_at = now;
        (next, outcome)
    }

    pub fn has_reported(&self, user_id: Uuid) -> bool {
        self.reports.iter().any(|report| report.reporter_id == user_id)
    }

    pub fn report(
        &self,
        reporter_id: Uuid,
        reason: ReportReason,
        now: DateTime<Utc>,
    ) -> Result<Self, ModerationError> {
        if self.has_reported(reporter_id) {
            return Err(ModerationError::DuplicateReport);
        }

        let mut next = self.clone();
        next.reports.push(ReportEntry {
            reporter_id,
            reason,
            created_at: now,
        });
        next.updated_at = now;
        Ok(next)
    }

    /// Marks or unmarks the item as featured. Only approved items can be featured.
    pub fn feature(&self, featured: bool, now: DateTime<Utc>) -> Result<Self, ModerationError> {
        if featured && self.status != ModerationStatus::Approved {
            return Err(ModerationError::ValidationError(format!(
                "Only approved content can be featured, item is {}",
                self.status
            )));
        }

        let mut next = self.clone();
        next.is_featured = featured;
        next.updated_at = now;
        Ok(next)
    }

    /// Human moderation: any of approved / rejected / hidden from any state,
    /// subject to the role hierarchy against the author's role.
    pub fn moderate(
        &self,
        actor: &Actor,
        author_role: Role,
        status: ModerationStatus,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ModerationError> {
        let permission = can_moderate(Some(actor), Some(author_role));
        if !permission.allowed {
            return Err(ModerationError::PermissionDenied(
                permission.reason.unwrap_or_default(),
            ));
        }

        if status == ModerationStatus::Pending {
            return Err(ModerationError::InvalidTransition {
                from: self.status,
                to: status,
            });
        }

        let mut next = self.clone();
        next.status = status;
        next.moderation = Some(ModerationRecord {
            moderated_by: Some(actor.id),
            moderated_at: now,
            reason: reason.to_string(),
        });
        next.updated_at = now;
        Ok(next)
    }
}
