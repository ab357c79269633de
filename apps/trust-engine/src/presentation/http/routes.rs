use super::{
    handlers::{content, health, moderation, reports, reputation, suspensions},
    middleware::auth::require_actor,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let moderator_routes = Router::new()
        .route("/api/v1/content/moderate", post(content::moderate))
        .route("/api/v1/content/feature", post(content::feature))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_actor));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Analysis
        .route("/api/v1/moderation/analyze", post(moderation::analyze))
        .route("/api/v1/moderation/decide", post(moderation::decide))
        // Content lifecycle
        .route("/api/v1/content/submit", post(content::submit))
        .route("/api/v1/content/edit", post(content::edit))
        .route("/api/v1/content/vote", post(content::vote))
        .route("/api/v1/content/report", post(content::report))
        // Reputation
        .route("/api/v1/reputation", post(reputation::summarize))
        .route("/api/v1/reputation/events", post(reputation::apply_events))
        // Suspensions and reports
        .route("/api/v1/suspensions/duration", post(suspensions::duration))
        .route("/api/v1/reports/evaluate", post(reports::evaluate))
        // Moderators (bearer JWT)
        .merge(moderator_routes)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
