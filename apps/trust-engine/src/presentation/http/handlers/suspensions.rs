use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::suspension::calculator::SuspensionDecision;
use crate::domain::user::history::ViolationHistory;
use crate::presentation::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DurationRequest {
    pub history: ViolationHistory,
    /// Evaluation instant; defaults to the server clock
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct DurationResponse {
    #[serde(flatten)]
    pub decision: SuspensionDecision,
    pub expires_at: DateTime<Utc>,
}

pub async fn duration(
    State(state): State<AppState>,
    Json(body): Json<DurationRequest>,
) -> Json<DurationResponse> {
    let now = body.at.unwrap_or_else(Utc::now);
    let decision = state.engine.suspensions().duration(&body.history, now);
    let expires_at = decision.expires_at(now);

    Json(DurationResponse {
        decision,
        expires_at,
    })
}
