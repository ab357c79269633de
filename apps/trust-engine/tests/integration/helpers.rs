use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use trust_engine::{
    application::moderation::use_case::ModerationUseCase,
    config::{Config, PolicyConfig},
    domain::{
        content::events::ContentEvent, moderation::log::ModerationLogEntry, user::role::Role,
    },
    infrastructure::audit::traits::AuditSink,
    presentation::http::{middleware::auth::ActorClaims, routes::create_router, state::AppState},
};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-jwt-secret";

/// Keeps every audit record in memory so tests can inspect them.
#[derive(Default)]
pub struct RecordingSink {
    pub logs: Mutex<Vec<ModerationLogEntry>>,
    pub events: Mutex<Vec<ContentEvent>>,
}

#[async_trait]
impl AuditSink for RecordingSink {
    async fn record_log(&self, entry: &ModerationLogEntry) -> anyhow::Result<()> {
        self.logs
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned"))?
            .push(entry.clone());
        Ok(())
    }

    async fn record_event(&self, event: &ContentEvent) -> anyhow::Result<()> {
        self.events
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned"))?
            .push(event.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub app: Router,
    pub audit: Arc<RecordingSink>,
}

fn build_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: JWT_SECRET.to_string(),
        policy_path: "./policy.toml".to_string(),
        request_body_limit_bytes: 1024 * 1024,
    }
}

/// Default policy with a short, predictable term list.
pub fn test_policy() -> PolicyConfig {
    let mut policy = PolicyConfig::default();
    policy.analyzer.prohibited_terms = vec![
        "fucking".to_string(),
        "damn".to_string(),
        "crap".to_string(),
    ];
    policy.analyzer.allowed_terms = vec![];
    policy
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_policy())
}

pub fn spawn_app_with(policy: PolicyConfig) -> TestApp {
    let audit = Arc::new(RecordingSink::default());
    let engine =
        ModerationUseCase::from_policy(&policy, audit.clone()).expect("failed to build engine");

    let state = AppState {
        engine: Arc::new(engine),
        config: build_config(),
    };

    TestApp {
        app: create_router(state),
        audit,
    }
}

pub fn token_for(role: Role) -> String {
    let claims = ActorClaims {
        sub: Uuid::now_v7(),
        username: format!("{}-{}", role.as_str(), Uuid::now_v7()),
        role,
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode token")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn post_json_as(uri: &str, body: &Value, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::USER_AGENT, "integration-tests")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();
    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// Posts `body` and returns the parsed JSON after checking the status.
pub async fn call(app: &Router, req: Request<Body>, expected: StatusCode) -> Value {
    let res = expect_status(send(app, req).await, expected).await;
    read_json(res).await
}
