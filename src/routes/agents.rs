// Agent CRUD, scoped to the authenticated owner

use axum::Json;
use axum::extract::{Path, State};

use super::AppState;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{
    Agent, CreateAgent, DEFAULT_INTERVAL_SECS, MIN_INTERVAL_SECS, UpdateAgent,
};

/// Malformed identifiers are indistinguishable from missing records.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound("Agent not found"))
}

fn validate_interval(interval: u32) -> Result<(), ApiError> {
    if interval < MIN_INTERVAL_SECS {
        return Err(ApiError::Validation(format!(
            "interval must be at least {} seconds",
            MIN_INTERVAL_SECS
        )));
    }
    Ok(())
}

/// Loads the agent and enforces ownership: 404 if absent, 401 if owned by
/// someone else.
async fn owned_agent(state: &AppState, user: AuthUser, id: i64) -> Result<Agent, ApiError> {
    let agent = state
        .store
        .get_agent(id)
        .await?
        .ok_or(ApiError::NotFound("Agent not found"))?;
    if agent.user_id != user.id {
        return Err(ApiError::Unauthorized("Not authorized"));
    }
    Ok(agent)
}

/// POST /api/agents
pub(super) async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateAgent>,
) -> Result<Json<Agent>, ApiError> {
    if body.name.trim().is_empty() || body.url.trim().is_empty() {
        return Err(ApiError::Validation("name and url are required".into()));
    }
    let interval = body.interval.unwrap_or(DEFAULT_INTERVAL_SECS);
    validate_interval(interval)?;

    let agent = state
        .store
        .create_agent(user.id, body.name.trim(), body.url.trim(), interval)
        .await?;
    tracing::info!(agent_id = agent.id, user_id = user.id, "agent created");
    Ok(Json(agent))
}

/// GET /api/agents — caller's agents, newest first.
pub(super) async fn list(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Agent>>, ApiError> {
    let agents = state.store.list_agents(user.id).await?;
    Ok(Json(agents))
}

/// GET /api/agents/:id
pub(super) async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>, ApiError> {
    let agent = owned_agent(&state, user, parse_id(&id)?).await?;
    Ok(Json(agent))
}

/// PUT /api/agents/:id
pub(super) async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateAgent>,
) -> Result<Json<Agent>, ApiError> {
    let id = parse_id(&id)?;
    if let Some(interval) = body.interval {
        validate_interval(interval)?;
    }
    owned_agent(&state, user, id).await?;

    let agent = state
        .store
        .update_agent(id, &body)
        .await?
        .ok_or(ApiError::NotFound("Agent not found"))?;
    Ok(Json(agent))
}

/// DELETE /api/agents/:id
pub(super) async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    owned_agent(&state, user, id).await?;

    if !state.store.delete_agent(id).await? {
        return Err(ApiError::NotFound("Agent not found"));
    }
    tracing::info!(agent_id = id, user_id = user.id, "agent removed");
    Ok(Json(serde_json::json!({ "msg": "Agent removed" })))
}
