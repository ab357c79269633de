use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::role::{Actor, Role};
use crate::presentation::http::{errors::AppError, state::AppState};

/// Bearer token claims identifying the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorClaims {
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub exp: usize,
}

impl From<ActorClaims> for Actor {
    fn from(claims: ActorClaims) -> Self {
        Actor {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

pub fn decode_actor(headers: &HeaderMap, secret: &str) -> Result<Actor, AppError> {
    let token = extract_bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    decode::<ActorClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| Actor::from(data.claims))
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

/// Authenticates the caller and stores the resulting [`Actor`] in request
/// extensions. Role checks happen in the engine.
pub async fn require_actor(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let actor = decode_actor(req.headers(), &state.config.jwt_secret)?;
    tracing::debug!(actor_id = %actor.id, role = actor.role.as_str(), "Authenticated actor");

    req.extensions_mut().insert(actor);
    Ok(next.run(req).await)
}
