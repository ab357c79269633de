use super::helpers::{call, post_json, post_json_as, send, spawn_app, token_for};
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use trust_engine::domain::user::role::Role;
use uuid::Uuid;

fn comment_draft(author_id: Uuid, content: &str) -> Value {
    json!({
        "kind": "comment",
        "author_id": author_id,
        "title": null,
        "content": content,
        "parent_id": null,
        "rating": null
    })
}

fn established_author(previous: u32) -> Value {
    let last_violation_at = (previous > 0).then(|| Utc::now() - Duration::days(5));
    json!({
        "history": {
            "violations": {
                "previous_violations": previous,
                "last_violation_at": last_violation_at
            },
            "account_age_days": 200
        },
        "blocks": []
    })
}

async fn submit_clean(app: &axum::Router) -> Value {
    let body = call(
        app,
        post_json(
            "/api/v1/content/submit",
            &json!({
                "draft": comment_draft(Uuid::now_v7(), "The vinyl pressing sounds warm"),
                "author": established_author(0)
            }),
        ),
        StatusCode::CREATED,
    )
    .await;
    body["item"].clone()
}

#[tokio::test]
async fn clean_submission_is_approved() {
    let app = spawn_app();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/content/submit",
            &json!({
                "draft": comment_draft(Uuid::now_v7(), "The vinyl pressing sounds warm"),
                "author": established_author(0)
            }),
        ),
        StatusCode::CREATED,
    )
    .await;

    assert_eq!(body["item"]["status"], "approved");
    assert_eq!(body["activity"], "create_comment");
    assert_eq!(body["degraded"], false);
    assert!(body["log"].is_null());
    assert!(body["quality_score"].is_null());
    assert_eq!(app.audit.events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn repeat_offender_submission_is_hidden_with_suspension() {
    let app = spawn_app();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/content/submit",
            &json!({
                "draft": comment_draft(Uuid::now_v7(), "This is a fucking great album"),
                "author": established_author(2)
            }),
        ),
        StatusCode::CREATED,
    )
    .await;

    assert_eq!(body["item"]["status"], "hidden");
    assert_eq!(body["verdict"]["action"], "suspend_user");
    assert_eq!(body["suspension"]["days"], 7);
    assert_eq!(body["violations"]["previous_violations"], 3);
    assert_eq!(body["log"]["action"], "suspend_user");
    assert_eq!(body["log"]["moderator"]["username"], "system");

    let logs = app.audit.logs.lock().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].details["suspension_days"], 7);
}

#[tokio::test]
async fn blocked_author_is_forbidden() {
    let app = spawn_app();
    let author_id = Uuid::now_v7();
    let now = Utc::now();
    let res = send(
        &app.app,
        post_json(
            "/api/v1/content/submit",
            &json!({
                "draft": comment_draft(author_id, "hello"),
                "author": {
                    "history": {},
                    "blocks": [{
                        "user_id": author_id,
                        "reason": "Harassment",
                        "moderator_id": null,
                        "created_at": now - Duration::days(1),
                        "expires_at": null,
                        "is_permanent": true
                    }]
                }
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn review_with_out_of_range_rating_is_rejected() {
    let app = spawn_app();
    let res = send(
        &app.app,
        post_json(
            "/api/v1/content/submit",
            &json!({
                "draft": {
                    "kind": "review",
                    "author_id": Uuid::now_v7(),
                    "title": "Great tour",
                    "content": "Loved every minute of it",
                    "parent_id": null,
                    "rating": 7
                }
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vote_toggle_round_trip() {
    let app = spawn_app();
    let item = submit_clean(&app.app).await;
    let voter = Uuid::now_v7();

    let liked = call(
        &app.app,
        post_json(
            "/api/v1/content/vote",
            &json!({ "item": item, "user_id": voter, "vote_type": "like" }),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(liked["item"]["vote_count"]["likes"], 1);
    assert_eq!(liked["author_activity"], "receive_like");

    let flipped = call(
        &app.app,
        post_json(
            "/api/v1/content/vote",
            &json!({ "item": liked["item"], "user_id": voter, "vote_type": "dislike" }),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(flipped["outcome"]["outcome"], "flipped");
    assert_eq!(flipped["item"]["vote_count"]["likes"], 0);
    assert_eq!(flipped["item"]["vote_count"]["dislikes"], 1);
}

#[tokio::test]
async fn second_report_from_same_user_conflicts() {
    let app = spawn_app();
    let item = submit_clean(&app.app).await;
    let report = json!({ "reporter_id": Uuid::now_v7(), "reason": "spam", "description": null });

    let first = call(
        &app.app,
        post_json(
            "/api/v1/content/report",
            &json!({ "item": item, "report": report }),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(first["assessment"]["intensity"], 1);

    let res = send(
        &app.app,
        post_json(
            "/api/v1/content/report",
            &json!({ "item": first["item"], "report": report }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn second_edit_conflicts() {
    let app = spawn_app();
    let item = submit_clean(&app.app).await;
    let author_id = item["author_id"].clone();

    let edited = call(
        &app.app,
        post_json(
            "/api/v1/content/edit",
            &json!({
                "item": item,
                "edit": { "editor_id": author_id, "title": null, "content": "Corrected take" }
            }),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(edited["is_edited"], true);
    assert_eq!(
        edited["edit_history"][0]["previous_content"],
        "The vinyl pressing sounds warm"
    );

    let res = send(
        &app.app,
        post_json(
            "/api/v1/content/edit",
            &json!({
                "item": edited,
                "edit": { "editor_id": author_id, "title": null, "content": "Again" }
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn moderation_requires_a_bearer_token() {
    let app = spawn_app();
    let item = submit_clean(&app.app).await;
    let res = send(
        &app.app,
        post_json(
            "/api/v1/content/moderate",
            &json!({
                "item": item,
                "moderation": { "status": "hidden", "reason": "Off topic" }
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn moderator_hides_content_and_audit_log_is_recorded() {
    let app = spawn_app();
    let item = submit_clean(&app.app).await;
    let token = token_for(Role::Moderator);

    let body = call(
        &app.app,
        post_json_as(
            "/api/v1/content/moderate",
            &json!({
                "item": item,
                "moderation": { "status": "hidden", "reason": "Off topic" }
            }),
            &token,
        ),
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["item"]["status"], "hidden");
    assert_eq!(body["log"]["action"], "hide");
    assert_eq!(body["log"]["user_agent"], "integration-tests");
    assert_eq!(body["log"]["ip"], "unknown");

    let logs = app.audit.logs.lock().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].reason, "Off topic");
}

#[tokio::test]
async fn role_hierarchy_is_enforced() {
    let app = spawn_app();
    let item = submit_clean(&app.app).await;

    let as_user = send(
        &app.app,
        post_json_as(
            "/api/v1/content/moderate",
            &json!({
                "item": item,
                "moderation": { "status": "rejected", "reason": "nope" }
            }),
            &token_for(Role::User),
        ),
    )
    .await;
    assert_eq!(as_user.status(), StatusCode::FORBIDDEN);

    let moderator_on_admin = send(
        &app.app,
        post_json_as(
            "/api/v1/content/moderate",
            &json!({
                "item": item,
                "moderation": { "status": "rejected", "reason": "nope", "author_role": "admin" }
            }),
            &token_for(Role::Moderator),
        ),
    )
    .await;
    assert_eq!(moderator_on_admin.status(), StatusCode::FORBIDDEN);

    let admin_on_moderator = send(
        &app.app,
        post_json_as(
            "/api/v1/content/moderate",
            &json!({
                "item": item,
                "moderation": { "status": "rejected", "reason": "spam", "author_role": "moderator" }
            }),
            &token_for(Role::Admin),
        ),
    )
    .await;
    assert_eq!(admin_on_moderator.status(), StatusCode::OK);
}

#[tokio::test]
async fn review_submission_carries_quality_and_feature_signals() {
    let app = spawn_app();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/content/submit",
            &json!({
                "draft": {
                    "kind": "review",
                    "author_id": Uuid::now_v7(),
                    "title": "A near perfect comeback record",
                    "content": "Every song lands, and the closing track is the best thing they have written.",
                    "parent_id": null,
                    "rating": 5,
                    "review": { "pros": ["Production"], "verified_purchase": true }
                },
                "author": { "standing": { "total_comments": 12, "average_rating": 4.2 } }
            }),
        ),
        StatusCode::CREATED,
    )
    .await;

    assert_eq!(body["item"]["status"], "approved");
    assert_eq!(body["featured_candidate"], true);
    assert_eq!(body["quality_score"], 85);
}

#[tokio::test]
async fn staff_can_feature_approved_content() {
    let app = spawn_app();
    let item = submit_clean(&app.app).await;

    let featured = call(
        &app.app,
        post_json_as(
            "/api/v1/content/feature",
            &json!({ "item": item }),
            &token_for(Role::Moderator),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(featured["is_featured"], true);

    let as_user = send(
        &app.app,
        post_json_as(
            "/api/v1/content/feature",
            &json!({ "item": item }),
            &token_for(Role::User),
        ),
    )
    .await;
    assert_eq!(as_user.status(), StatusCode::FORBIDDEN);

    let anonymous = send(
        &app.app,
        post_json("/api/v1/content/feature", &json!({ "item": item })),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}

