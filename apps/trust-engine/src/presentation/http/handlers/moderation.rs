use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::moderation::verdict::{ContentAnalysis, ModerationVerdict};
use crate::domain::shared::errors::ModerationError;
use crate::domain::user::history::{AuthorProfile, UserHistory};
use crate::presentation::http::{errors::AppError, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(max = 20000))]
    pub text: String,
    #[validate(length(max = 500))]
    pub title: Option<String>,
    /// When present, author history raises the score
    pub profile: Option<AuthorProfile>,
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<ContentAnalysis>, AppError> {
    body.validate().map_err(ModerationError::from)?;

    let analyzer = state.engine.analyzer();
    let analysis = match &body.profile {
        Some(profile) => analyzer.analyze_with_history(&body.text, body.title.as_deref(), profile)?,
        None => analyzer.analyze(&body.text, body.title.as_deref())?,
    };

    Ok(Json(analysis))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DecideRequest {
    #[validate(length(max = 20000))]
    pub text: String,
    #[validate(length(max = 500))]
    pub title: Option<String>,
    #[serde(default)]
    pub history: UserHistory,
}

#[derive(Debug, Serialize)]
pub struct DecideResponse {
    pub analysis: ContentAnalysis,
    pub verdict: ModerationVerdict,
}

pub async fn decide(
    State(state): State<AppState>,
    Json(body): Json<DecideRequest>,
) -> Result<Json<DecideResponse>, AppError> {
    body.validate().map_err(ModerationError::from)?;

    let analysis = state
        .engine
        .analyzer()
        .analyze(&body.text, body.title.as_deref())?;
    let verdict = state.engine.policy().decide(&analysis, &body.history);

    Ok(Json(DecideResponse { analysis, verdict }))
}
