use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use super::dto::{
    AuthorContext, ContentDraft, EditRequest, ModerateRequest, ModerateResult, ReportRequest,
    ReportResult, Submission, VoteResult,
};
use super::quality::{review_quality_score, should_be_featured};
use crate::application::policy::engine::PolicyEngine;
use crate::application::reports::aggregator::ReportAggregator;
use crate::application::reputation::accountant::ReputationAccountant;
use crate::application::suspension::calculator::SuspensionCalculator;
use crate::config::PolicyConfig;
use crate::domain::content::entity::{ContentItem, ContentKind, ModerationStatus};
use crate::domain::content::events::ContentEvent;
use crate::domain::content::vote::{VoteOutcome, VoteType};
use crate::domain::moderation::log::{LogAction, LogTarget, ModerationLogEntry, RequestContext};
use crate::domain::moderation::verdict::{ModerationAction, Severity};
use crate::domain::report::entity::{ContentReport, ReportTarget};
use crate::domain::shared::errors::ModerationError;
use crate::domain::user::block::check_block_status;
use crate::domain::user::role::{Actor, can_moderate};
use crate::domain::user::stats::ActivityEvent;
use crate::infrastructure::audit::traits::AuditSink;
use crate::infrastructure::matching::word_list::WordListMatcher;
use crate::infrastructure::security::content_analyzer::ContentAnalyzer;

/// Wires the analyzer, policy, suspension, report and reputation components
/// into the content workflows.
///
/// Every workflow takes the current snapshot of the item and returns the next
/// one. Persisting it atomically is the caller's job.
pub struct ModerationUseCase {
    analyzer: Arc<ContentAnalyzer>,
    policy: PolicyEngine,
    accountant: ReputationAccountant,
    suspensions: SuspensionCalculator,
    aggregator: ReportAggregator,
    audit: Arc<dyn AuditSink>,
}

impl ModerationUseCase {
    pub fn new(
        analyzer: Arc<ContentAnalyzer>,
        policy: PolicyEngine,
        accountant: ReputationAccountant,
        suspensions: SuspensionCalculator,
        aggregator: ReportAggregator,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            analyzer,
            policy,
            accountant,
            suspensions,
            aggregator,
            audit,
        }
    }

    /// Builds every component from policy configuration, matching terms with
    /// the configured word lists.
    pub fn from_policy(
        policy: &PolicyConfig,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self, regex::Error> {
        let matcher = WordListMatcher::new(
            &policy.analyzer.prohibited_terms,
            &policy.analyzer.allowed_terms,
        );
        let analyzer = ContentAnalyzer::new(Arc::new(matcher), policy.analyzer.clone())?;

        Ok(Self::new(
            Arc::new(analyzer),
            PolicyEngine::new(policy.policy.clone()),
            ReputationAccountant::new(policy.weights.clone(), policy.badges.clone()),
            SuspensionCalculator::new(policy.suspension.clone()),
            ReportAggregator::new(policy.reports.clone()),
            audit,
        ))
    }

    pub fn analyzer(&self) -> &ContentAnalyzer {
        &self.analyzer
    }

    pub fn policy(&self) -> &PolicyEngine {
        &self.policy
    }

    pub fn accountant(&self) -> &ReputationAccountant {
        &self.accountant
    }

    pub fn suspensions(&self) -> &SuspensionCalculator {
        &self.suspensions
    }

    pub fn aggregator(&self) -> &ReportAggregator {
        &self.aggregator
    }

    /// Scores a new item and gives it its initial moderation state.
    ///
    /// A removal for an author with prior violations escalates to a suspension.
    /// If the analyzer fails the item stays pending for manual review.
    #[instrument(skip(self, draft, author), fields(kind = ?draft.kind, author_id = %draft.author_id))]
    pub async fn submit(
        &self,
        draft: ContentDraft,
        author: &AuthorContext,
        now: DateTime<Utc>,
    ) -> Result<Submission, ModerationError> {
        let block = check_block_status(draft.author_id, &author.blocks, now);
        if block.is_blocked {
            warn!(block_type = ?block.block_type, "Blocked author attempted to post");
            return Err(ModerationError::AccountBlocked(
                block.reason.unwrap_or_else(|| "Account is blocked".to_string()),
            ));
        }

        draft.validate()?;

        let kind = draft.kind;
        let item = ContentItem::new(
            Uuid::now_v7(),
            kind,
            draft.author_id,
            draft.title,
            draft.content,
            draft.parent_id,
            draft.rating,
            now,
        );
        let review = draft.review;

        let analysis = match self.analyzer.analyze(&item.content, item.title.as_deref()) {
            Ok(analysis) => analysis,
            Err(
                err @ (ModerationError::AnalyzerUnavailable(_)
                | ModerationError::InvalidSeverityInput(_)),
            ) => {
                warn!(
                    content_id = %item.id,
                    error = %err,
                    "Content analyzer unavailable, item left pending for manual review"
                );
                self.emit(ContentEvent::Submitted {
                    content_id: item.id,
                    status: item.status,
                    action: None,
                })
                .await;

                return Ok(Submission {
                    item,
                    analysis: None,
                    verdict: None,
                    violations: author.history.violations.clone(),
                    suspension: None,
                    activity: None,
                    log: None,
                    featured_candidate: false,
                    quality_score: None,
                    degraded: true,
                });
            }
            Err(err) => return Err(err),
        };

        let mut verdict = self.policy.decide(&analysis, &author.history);
        let mut suspension = None;
        if verdict.action == ModerationAction::DeleteContent
            && author.history.violations.has_violations()
        {
            let decision = self.suspensions.duration(&author.history.violations, now);
            info!(
                days = decision.days,
                ordinal = decision.ordinal,
                decayed = decision.decayed,
                "Escalating repeat offender to suspension"
            );
            verdict.action = ModerationAction::SuspendUser;
            suspension = Some(decision);
        }

        let violations = if verdict.action.is_violation() {
            author.history.violations.recorded(now)
        } else {
            author.history.violations.clone()
        };

        let item = item.apply_action(
            verdict.action,
            analysis.censored_text.as_deref(),
            &verdict.reason,
            now,
        )?;

        let activity = match (item.status, kind) {
            (ModerationStatus::Approved, ContentKind::Thread) => Some(ActivityEvent::CreateThread),
            (ModerationStatus::Approved, ContentKind::Comment | ContentKind::Reply) => {
                Some(ActivityEvent::CreateComment)
            }
            _ => None,
        };

        let featured_candidate = item.status == ModerationStatus::Approved
            && should_be_featured(&item.content, item.rating, &author.standing, &review.pros);
        let quality_score = (kind == ContentKind::Review).then(|| {
            review_quality_score(
                item.title.as_deref(),
                &item.content,
                review.image_count,
                review.verified_purchase,
            )
        });

        let log = self
            .record_automated(
                verdict.action,
                &item,
                &verdict.reason,
                verdict.severity,
                json!({
                    "score": analysis.score,
                    "flags": analysis.flags,
                    "matched_terms": analysis.matched_terms.len(),
                    "suspension_days": suspension.as_ref().map(|decision| decision.days),
                }),
                now,
            )
            .await;

        info!(
            content_id = %item.id,
            status = item.status.as_str(),
            action = ?verdict.action,
            score = analysis.score,
            "Content submitted"
        );

        self.emit(ContentEvent::Submitted {
            content_id: item.id,
            status: item.status,
            action: Some(verdict.action),
        })
        .await;

        Ok(Submission {
            item,
            analysis: Some(analysis),
            verdict: Some(verdict),
            violations,
            suspension,
            activity,
            log,
            featured_candidate,
            quality_score,
            degraded: false,
        })
    }

    /// The author's single permitted edit.
    #[instrument(skip(self, item, request), fields(content_id = %item.id))]
    pub async fn edit(
        &self,
        item: &ContentItem,
        request: EditRequest,
        now: DateTime<Utc>,
    ) -> Result<ContentItem, ModerationError> {
        request.validate()?;

        if request.editor_id != item.author_id {
            warn!(editor_id = %request.editor_id, "Edit attempted by someone other than the author");
            return Err(ModerationError::PermissionDenied(
                "Only the author can edit this content".to_string(),
            ));
        }

        let edited = item.edit(request.title, request.content, now)?;
        info!(editor_id = %request.editor_id, "Content edited");

        self.emit(ContentEvent::Edited { content_id: item.id }).await;
        Ok(edited)
    }

    pub async fn vote(
        &self,
        item: &ContentItem,
        user_id: Uuid,
        vote_type: VoteType,
        now: DateTime<Utc>,
    ) -> VoteResult {
        let (item, outcome) = item.vote(user_id, vote_type, now);

        // Only fresh votes credit the author; the ledger has no reversal events.
        let author_activity = match outcome {
            VoteOutcome::Added { vote_type: VoteType::Like } => Some(ActivityEvent::ReceiveLike),
            VoteOutcome::Added { vote_type: VoteType::Dislike } => {
                Some(ActivityEvent::ReceiveDislike)
            }
            VoteOutcome::Removed { .. } | VoteOutcome::Flipped { .. } => None,
        };

        self.emit(ContentEvent::Voted {
            content_id: item.id,
            user_id,
            outcome,
        })
        .await;

        VoteResult {
            item,
            outcome,
            author_activity,
        }
    }

    /// Records a report, aggregates it with earlier reports on the item and
    /// hides the item when the bucket reaches high priority.
    #[instrument(skip(self, item, request), fields(content_id = %item.id, reason = ?request.reason))]
    pub async fn report(
        &self,
        item: &ContentItem,
        request: ReportRequest,
        now: DateTime<Utc>,
    ) -> Result<ReportResult, ModerationError> {
        request.validate()?;

        let target = ReportTarget {
            target_type: item.kind.target_type(),
            id: item.id,
        };
        let existing: Vec<ContentReport> = item
            .reports
            .iter()
            .map(|entry| ContentReport {
                reporter_id: entry.reporter_id,
                target,
                reason: entry.reason,
                description: None,
                created_at: entry.created_at,
            })
            .collect();

        let reported = item.report(request.reporter_id, request.reason, now)?;
        let report = ContentReport {
            reporter_id: request.reporter_id,
            target,
            reason: request.reason,
            description: request.description,
            created_at: now,
        };

        let assessment = self.aggregator.evaluate(&report, &existing);
        let escalation = self.policy.decide_on_reports(&assessment);

        let (item, log) = if escalation.action == ModerationAction::Hide
            && !reported.status.is_terminal()
        {
            warn!(
                intensity = assessment.intensity,
                "Report threshold reached, hiding content for review"
            );
            let hidden = reported.apply_action(ModerationAction::Hide, None, &escalation.reason, now)?;
            let log = self
                .record_automated(
                    escalation.action,
                    &hidden,
                    &escalation.reason,
                    escalation.severity,
                    json!({
                        "reason": request.reason,
                        "intensity": assessment.intensity,
                        "previous_status": reported.status.as_str(),
                    }),
                    now,
                )
                .await;
            (hidden, log)
        } else {
            (reported, None)
        };

        info!(
            intensity = assessment.intensity,
            priority = ?assessment.priority,
            immediate = assessment.requires_immediate_action,
            "Content reported"
        );

        self.emit(ContentEvent::Reported {
            content_id: item.id,
            reporter_id: request.reporter_id,
            reason: request.reason,
        })
        .await;

        Ok(ReportResult {
            item,
            report,
            assessment,
            escalation,
            log,
        })
    }

    /// Human moderation. The resulting log entry is forwarded to the audit sink.
    #[instrument(skip(self, item, actor, request), fields(content_id = %item.id, moderator_id = %actor.id))]
    pub async fn moderate(
        &self,
        item: &ContentItem,
        actor: &Actor,
        request: ModerateRequest,
        now: DateTime<Utc>,
    ) -> Result<ModerateResult, ModerationError> {
        request.validate()?;

        let previous = item.status;
        let moderated = item
            .moderate(actor, request.author_role, request.status, &request.reason, now)
            .inspect_err(|err| {
                if let ModerationError::PermissionDenied(reason) = err {
                    warn!(role = actor.role.as_str(), reason = %reason, "Moderation refused");
                }
            })?;

        let action = LogAction::for_status(request.status).ok_or(
            ModerationError::InvalidTransition {
                from: previous,
                to: request.status,
            },
        )?;

        let log = ModerationLogEntry::new(
            actor,
            action,
            LogTarget {
                target_type: item.kind.target_type(),
                id: item.id,
            },
            request.reason,
            request.severity,
            json!({
                "previous_status": previous.as_str(),
                "new_status": moderated.status.as_str(),
            }),
            &request.context,
            now,
        );

        if let Err(err) = self.audit.record_log(&log).await {
            error!(error = %err, "Failed to record moderation log entry");
        }

        info!(
            from = previous.as_str(),
            to = moderated.status.as_str(),
            "Content moderated"
        );

        self.emit(ContentEvent::Moderated {
            content_id: item.id,
            moderator_id: actor.id,
            status: moderated.status,
        })
        .await;

        Ok(ModerateResult {
            item: moderated,
            log,
        })
    }

    /// Staff pick for the featured shelf.
    #[instrument(skip(self, item, actor), fields(content_id = %item.id, moderator_id = %actor.id))]
    pub async fn feature(
        &self,
        item: &ContentItem,
        actor: &Actor,
        featured: bool,
        now: DateTime<Utc>,
    ) -> Result<ContentItem, ModerationError> {
        let permission = can_moderate(Some(actor), None);
        if !permission.allowed {
            let reason = permission.reason.unwrap_or_default();
            warn!(role = actor.role.as_str(), reason = %reason, "Feature refused");
            return Err(ModerationError::PermissionDenied(reason));
        }

        let updated = item.feature(featured, now)?;
        info!(featured, "Content feature flag updated");

        self.emit(ContentEvent::Featured {
            content_id: item.id,
            moderator_id: actor.id,
            featured,
        })
        .await;
        Ok(updated)
    }

    /// Audit entry for an action the engine took without a human moderator.
    async fn record_automated(
        &self,
        action: ModerationAction,
        item: &ContentItem,
        reason: &str,
        severity: Severity,
        details: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Option<ModerationLogEntry> {
        let action = LogAction::for_action(action)?;
        let log = ModerationLogEntry::new(
            &Actor::system(),
            action,
            LogTarget {
                target_type: item.kind.target_type(),
                id: item.id,
            },
            reason,
            severity,
            details,
            &RequestContext::default(),
            now,
        );

        if let Err(err) = self.audit.record_log(&log).await {
            error!(error = %err, "Failed to record moderation log entry");
        }
        Some(log)
    }

    async fn emit(&self, event: ContentEvent) {
        if let Err(err) = self.audit.record_event(&event).await {
            error!(error = %err, "Failed to record content event");
        }
    }
}
