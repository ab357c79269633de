use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::application::moderation::dto::{
    AuthorContext, ContentDraft, EditRequest, ModerateRequest, ModerateResult, ReportRequest,
    ReportResult, Submission, VoteResult,
};
use crate::domain::content::entity::ContentItem;
use crate::domain::content::vote::VoteType;
use crate::domain::moderation::log::RequestContext;
use crate::domain::user::role::Actor;
use crate::presentation::http::{errors::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
    pub draft: ContentDraft,
    #[serde(default)]
    pub author: AuthorContext,
}

pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitBody>,
) -> Result<(StatusCode, Json<Submission>), AppError> {
    let submission = state
        .engine
        .submit(body.draft, &body.author, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

#[derive(Debug, Deserialize)]
pub struct EditBody {
    pub item: ContentItem,
    pub edit: EditRequest,
}

pub async fn edit(
    State(state): State<AppState>,
    Json(body): Json<EditBody>,
) -> Result<Json<ContentItem>, AppError> {
    let item = state.engine.edit(&body.item, body.edit, Utc::now()).await?;
    Ok(Json(item))
}

#[derive(Debug, Deserialize)]
pub struct VoteBody {
    pub item: ContentItem,
    pub user_id: Uuid,
    pub vote_type: VoteType,
}

pub async fn vote(State(state): State<AppState>, Json(body): Json<VoteBody>) -> Json<VoteResult> {
    Json(
        state
            .engine
            .vote(&body.item, body.user_id, body.vote_type, Utc::now())
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct ReportBody {
    pub item: ContentItem,
    pub report: ReportRequest,
}

pub async fn report(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Json<ReportResult>, AppError> {
    let result = state
        .engine
        .report(&body.item, body.report, Utc::now())
        .await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct ModerateBody {
    pub item: ContentItem,
    pub moderation: ModerateRequest,
}

/// Client metadata from proxy headers, used when the body does not carry it.
fn request_context(headers: &HeaderMap) -> RequestContext {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    RequestContext {
        ip: header_value("x-forwarded-for")
            .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
            .or_else(|| header_value("x-real-ip")),
        user_agent: header_value(header::USER_AGENT.as_str()),
    }
}

pub async fn moderate(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    headers: HeaderMap,
    Json(body): Json<ModerateBody>,
) -> Result<Json<ModerateResult>, AppError> {
    let mut request = body.moderation;
    let from_headers = request_context(&headers);
    request.context.ip = request.context.ip.or(from_headers.ip);
    request.context.user_agent = request.context.user_agent.or(from_headers.user_agent);

    let result = state
        .engine
        .moderate(&body.item, &actor, request, Utc::now())
        .await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct FeatureBody {
    pub item: ContentItem,
    #[serde(default = "feature_by_default")]
    pub featured: bool,
}

fn feature_by_default() -> bool {
    true
}

pub async fn feature(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<FeatureBody>,
) -> Result<Json<ContentItem>, AppError> {
    let item = state
        .engine
        .feature(&body.item, &actor, body.featured, Utc::now())
        .await?;
    Ok(Json(item))
}
