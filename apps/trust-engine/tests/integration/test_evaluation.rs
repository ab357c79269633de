use super::helpers::{call, post_json, send, spawn_app};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn health_reports_version() {
    let app = spawn_app();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("failed to build request");

    let res = send(&app.app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn analyze_flags_a_single_profane_term() {
    let app = spawn_app();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/moderation/analyze",
            &json!({ "text": "This is a fucking great album" }),
        ),
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["has_violation"], true);
    assert_eq!(body["matched_terms"], json!(["fucking"]));
    assert_eq!(body["severity"], "medium");
    assert_eq!(body["score"], 10);
}

#[tokio::test]
async fn analyze_with_profile_adds_history_points() {
    let app = spawn_app();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/moderation/analyze",
            &json!({
                "text": "Solid live album",
                "profile": { "reported_comments": 2, "account_age_days": 3 }
            }),
        ),
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["score"], 6);
    assert_eq!(body["has_violation"], true);
}

#[tokio::test]
async fn decide_warns_new_users_and_deletes_for_repeat_offenders() {
    let app = spawn_app();

    let newcomer = call(
        &app.app,
        post_json(
            "/api/v1/moderation/decide",
            &json!({
                "text": "This is a fucking great album",
                "history": {
                    "violations": { "previous_violations": 0 },
                    "account_age_days": 1
                }
            }),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(newcomer["verdict"]["action"], "warn");

    let repeat = call(
        &app.app,
        post_json(
            "/api/v1/moderation/decide",
            &json!({
                "text": "This is a fucking great album",
                "history": {
                    "violations": { "previous_violations": 2 },
                    "account_age_days": 1
                }
            }),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(repeat["verdict"]["action"], "delete_content");
    assert_eq!(repeat["verdict"]["severity"], "high");
}

#[tokio::test]
async fn oversized_analysis_request_is_rejected() {
    let app = spawn_app();
    let res = send(
        &app.app,
        post_json(
            "/api/v1/moderation/analyze",
            &json!({ "text": "x".repeat(20001) }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reputation_summary_matches_weighted_total() {
    let app = spawn_app();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/reputation",
            &json!({
                "stats": {
                    "threads_created": 2,
                    "comments_created": 5,
                    "likes_received": 10,
                    "dislikes_received": 2,
                    "thread_views": 100,
                    "comment_views": 50,
                    "helpful_comments": 3,
                    "first_thread": true
                },
                "badge": "expert"
            }),
        ),
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["reputation"], 60);
    assert_eq!(body["primary_badge"]["key"], "firstThread");
    assert_eq!(body["next_badge"]["key"], "expert");
    assert_eq!(body["progress"]["remaining"], 40);
}

#[tokio::test]
async fn unknown_badge_is_not_found() {
    let app = spawn_app();
    let res = send(
        &app.app,
        post_json(
            "/api/v1/reputation",
            &json!({ "stats": {}, "badge": "platinum" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn applying_events_updates_stats() {
    let app = spawn_app();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/reputation/events",
            &json!({
                "stats": {},
                "events": ["create_thread", "receive_like", "receive_like"]
            }),
        ),
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["stats"]["threads_created"], 1);
    assert_eq!(body["stats"]["first_thread"], true);
    assert_eq!(body["summary"]["reputation"], 17);
}

#[tokio::test]
async fn suspension_for_third_violation_is_one_week() {
    let app = spawn_app();
    let now = Utc::now();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/suspensions/duration",
            &json!({
                "history": {
                    "previous_violations": 2,
                    "last_violation_at": now - Duration::days(5)
                },
                "at": now
            }),
        ),
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["days"], 7);
    assert_eq!(body["decayed"], false);
    assert_eq!(body["reason_label"], "Suspension for violation #3");
}

#[tokio::test]
async fn fifth_report_in_a_bucket_escalates_to_hide() {
    let app = spawn_app();
    let target = json!({ "type": "thread", "id": Uuid::now_v7() });
    let report = |reason: &str| -> Value {
        json!({
            "reporter_id": Uuid::now_v7(),
            "target": target.clone(),
            "reason": reason,
            "description": null,
            "created_at": Utc::now()
        })
    };

    let existing: Vec<Value> = (0..4).map(|_| report("spam")).collect();
    let body = call(
        &app.app,
        post_json(
            "/api/v1/reports/evaluate",
            &json!({ "report": report("spam"), "existing": existing }),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["intensity"], 5);
    assert_eq!(body["priority"], "high");
    assert_eq!(body["escalation"]["action"], "hide");

    let other_reason = call(
        &app.app,
        post_json(
            "/api/v1/reports/evaluate",
            &json!({ "report": report("harassment"), "existing": existing }),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(other_reason["intensity"], 1);
    assert_eq!(other_reason["priority"], "low");
}
