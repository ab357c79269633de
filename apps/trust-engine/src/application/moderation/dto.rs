use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::suspension::calculator::SuspensionDecision;
use crate::domain::content::entity::{ContentItem, ContentKind, ModerationStatus};
use crate::domain::content::vote::VoteOutcome;
use crate::domain::moderation::log::{ModerationLogEntry, RequestContext};
use crate::domain::moderation::verdict::{ContentAnalysis, ModerationVerdict, Severity};
use crate::domain::report::entity::{ContentReport, ReportAssessment, ReportReason};
use crate::domain::user::block::UserBlock;
use crate::domain::user::history::{AuthorStanding, UserHistory, ViolationHistory};
use crate::domain::user::role::Role;
use crate::domain::user::stats::ActivityEvent;

/// New user-submitted content awaiting its initial moderation state.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[validate(schema(function = "validate_review_rules"))]
#[ts(export)]
pub struct ContentDraft {
    pub kind: ContentKind,
    pub author_id: Uuid,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 10000))]
    pub content: String,
    pub parent_id: Option<Uuid>,
    pub rating: Option<u8>,
    #[serde(default)]
    #[validate(nested)]
    pub review: ReviewDetails,
}

/// Extra signals a review may carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, Validate)]
#[serde(default)]
#[ts(export)]
pub struct ReviewDetails {
    #[validate(length(max = 10))]
    pub pros: Vec<String>,
    pub image_count: u32,
    pub verified_purchase: bool,
}

/// Reviews carry a 1-5 rating, a 5-100 character title and a 10-1000 character body.
fn validate_review_rules(draft: &ContentDraft) -> Result<(), ValidationError> {
    if draft.kind != ContentKind::Review {
        return Ok(());
    }

    if !matches!(draft.rating, Some(1..=5)) {
        return Err(ValidationError::new("rating")
            .with_message("Rating must be between 1 and 5".into()));
    }

    let title = draft.title.as_deref().unwrap_or_default();
    if title.trim().chars().count() < 5 || title.chars().count() > 100 {
        return Err(ValidationError::new("title")
            .with_message("Title must be between 5 and 100 characters".into()));
    }

    let content_len = draft.content.chars().count();
    if !(10..=1000).contains(&content_len) {
        return Err(ValidationError::new("content")
            .with_message("Comment must be between 10 and 1000 characters".into()));
    }

    Ok(())
}

/// What the engine knows about the author at submission time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorContext {
    pub history: UserHistory,
    pub blocks: Vec<UserBlock>,
    pub standing: AuthorStanding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub item: ContentItem,
    /// `None` when the analyzer was unavailable and the item was left pending
    pub analysis: Option<ContentAnalysis>,
    pub verdict: Option<ModerationVerdict>,
    /// Author history after this submission
    pub violations: ViolationHistory,
    pub suspension: Option<SuspensionDecision>,
    /// Reputation event to credit to the author
    pub activity: Option<ActivityEvent>,
    /// Audit entry for the automated action, if any was taken
    pub log: Option<ModerationLogEntry>,
    pub featured_candidate: bool,
    /// Only computed for reviews
    pub quality_score: Option<u8>,
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EditRequest {
    pub editor_id: Uuid,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResult {
    pub item: ContentItem,
    pub outcome: VoteOutcome,
    /// Reputation event to credit to the content author
    pub author_activity: Option<ActivityEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportRequest {
    pub reporter_id: Uuid,
    pub reason: ReportReason,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResult {
    pub item: ContentItem,
    pub report: ContentReport,
    pub assessment: ReportAssessment,
    pub escalation: ModerationVerdict,
    /// Present when the reports hid the item
    pub log: Option<ModerationLogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ModerateRequest {
    pub status: ModerationStatus,
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
    #[serde(default)]
    pub author_role: Role,
    #[serde(default = "default_log_severity")]
    pub severity: Severity,
    #[serde(default)]
    pub context: RequestContext,
}

fn default_log_severity() -> Severity {
    Severity::Medium
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateResult {
    pub item: ContentItem,
    pub log: ModerationLogEntry,
}
