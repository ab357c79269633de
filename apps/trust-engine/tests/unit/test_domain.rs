use chrono::{Duration, Utc};
use trust_engine::application::{
    reputation::accountant::ReputationAccountant,
    suspension::calculator::SuspensionCalculator,
};
use trust_engine::domain::{
    content::{
        entity::{ContentItem, ContentKind, ModerationStatus},
        vote::VoteType,
    },
    moderation::verdict::{ModerationAction, Severity},
    report::entity::ReportReason,
    shared::errors::ModerationError,
    user::{
        history::ViolationHistory,
        role::{Actor, Role},
        stats::{ActivityEvent, UserActivityStats},
    },
};
use uuid::Uuid;

fn comment(content: &str) -> ContentItem {
    ContentItem::new(
        Uuid::now_v7(),
        ContentKind::Comment,
        Uuid::now_v7(),
        None,
        content.to_string(),
        None,
        None,
        Utc::now(),
    )
}

#[test]
fn voting_twice_with_the_same_type_restores_the_item() {
    let item = comment("first listen");
    let voter = Uuid::now_v7();
    let now = Utc::now();

    let (liked, _) = item.vote(voter, VoteType::Like, now);
    let (cleared, _) = liked.vote(voter, VoteType::Like, now);

    assert_eq!(cleared.vote_count, item.vote_count);
    assert!(cleared.votes.is_empty());
    assert_eq!(cleared.user_vote(voter), None);
}

#[test]
fn only_one_edit_is_accepted() {
    let item = comment("origin");
    let now = Utc::now();

    let edited = item.edit(None, "revised".to_string(), now).unwrap();
    assert_eq!(edited.edit_history.len(), 1);
    assert_eq!(edited.edit_history[0].previous_content, "origin");

    let err = edited.edit(None, "again".to_string(), now).unwrap_err();
    assert!(matches!(err, ModerationError::DuplicateEdit));
}

#[test]
fn reporter_is_counted_once_per_item() {
    let item = comment("spam spam");
    let reporter = Uuid::now_v7();
    let now = Utc::now();

    let reported = item.report(reporter, ReportReason::Spam, now).unwrap();
    let err = reported
        .report(reporter, ReportReason::Harassment, now)
        .unwrap_err();
    assert!(matches!(err, ModerationError::DuplicateReport));
    assert_eq!(reported.reports.len(), 1);
}

#[test]
fn hidden_items_ignore_automated_actions_but_accept_staff_decisions() {
    let now = Utc::now();
    let hidden = comment("bad")
        .apply_action(ModerationAction::DeleteContent, None, "deleted", now)
        .unwrap();
    assert_eq!(hidden.status, ModerationStatus::Hidden);

    assert!(
        hidden
            .apply_action(ModerationAction::None, None, "recheck", now)
            .is_err()
    );

    let admin = Actor {
        id: Uuid::now_v7(),
        username: "root".to_string(),
        role: Role::Admin,
    };
    let restored = hidden
        .moderate(&admin, Role::User, ModerationStatus::Approved, "appeal", now)
        .unwrap();
    assert_eq!(restored.status, ModerationStatus::Approved);
    assert_eq!(
        restored.moderation.and_then(|record| record.moderated_by),
        Some(admin.id)
    );
}

#[test]
fn severity_parsing_is_case_insensitive() {
    assert_eq!(" HIGH ".parse::<Severity>().unwrap(), Severity::High);
    assert!(matches!(
        "extreme".parse::<Severity>(),
        Err(ModerationError::InvalidSeverityInput(_))
    ));
}

#[test]
fn reputation_never_drops_below_zero() {
    let accountant = ReputationAccountant::default();
    let stats = (0..10).fold(UserActivityStats::default(), |stats, _| {
        accountant.apply_event(&stats, ActivityEvent::ReceiveDislike)
    });
    assert_eq!(stats.dislikes_received, 10);
    assert_eq!(accountant.reputation(&stats), 0);
}

#[test]
fn suspensions_grow_with_recorded_violations() {
    let calculator = SuspensionCalculator::default();
    let now = Utc::now();
    let mut history = ViolationHistory::default();
    let mut durations = Vec::new();

    for offset in (1..=5).rev() {
        durations.push(calculator.duration(&history, now).days);
        history = history.recorded(now - Duration::days(offset));
    }

    assert_eq!(durations, vec![1, 3, 7, 30, 365]);
}
