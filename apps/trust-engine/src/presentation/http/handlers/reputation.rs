use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::application::reputation::accountant::{BadgeProgress, ReputationSummary};
use crate::domain::user::stats::{ActivityEvent, UserActivityStats};
use crate::presentation::http::{errors::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ReputationRequest {
    pub stats: UserActivityStats,
    /// Badge to report progress towards
    pub badge: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReputationResponse {
    #[serde(flatten)]
    pub summary: ReputationSummary,
    pub progress: Option<BadgeProgress>,
}

pub async fn summarize(
    State(state): State<AppState>,
    Json(body): Json<ReputationRequest>,
) -> Result<Json<ReputationResponse>, AppError> {
    let accountant = state.engine.accountant();

    let progress = match body.badge.as_deref() {
        Some(key) => {
            if accountant.catalog().get(key).is_none() {
                return Err(AppError::NotFound(format!("Badge {}", key)));
            }
            accountant.badge_progress(&body.stats, key)
        }
        None => None,
    };

    Ok(Json(ReputationResponse {
        summary: accountant.summary(&body.stats),
        progress,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ApplyEventsRequest {
    pub stats: UserActivityStats,
    pub events: Vec<ActivityEvent>,
}

#[derive(Debug, Serialize)]
pub struct ApplyEventsResponse {
    pub stats: UserActivityStats,
    pub summary: ReputationSummary,
}

pub async fn apply_events(
    State(state): State<AppState>,
    Json(body): Json<ApplyEventsRequest>,
) -> Json<ApplyEventsResponse> {
    let accountant = state.engine.accountant();
    let stats = body
        .events
        .iter()
        .fold(body.stats, |stats, event| accountant.apply_event(&stats, *event));
    let summary = accountant.summary(&stats);

    Json(ApplyEventsResponse { stats, summary })
}
