use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::moderation::verdict::ModerationVerdict;
use crate::domain::report::entity::{ContentReport, ReportAssessment};
use crate::presentation::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub report: ContentReport,
    #[serde(default)]
    pub existing: Vec<ContentReport>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub assessment: ReportAssessment,
    pub escalation: ModerationVerdict,
}

pub async fn evaluate(
    State(state): State<AppState>,
    Json(body): Json<EvaluateRequest>,
) -> Json<EvaluateResponse> {
    let assessment = state.engine.aggregator().evaluate(&body.report, &body.existing);
    let escalation = state.engine.policy().decide_on_reports(&assessment);

    Json(EvaluateResponse {
        assessment,
        escalation,
    })
}
