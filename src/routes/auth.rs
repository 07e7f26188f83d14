// Registration, login, and current-user lookup

use axum::Json;
use axum::extract::State;

use super::AppState;
use crate::auth::{self, AuthUser};
use crate::error::ApiError;
use crate::models::{Credentials, Registration, TokenResponse, UserProfile};

/// POST /api/auth/register
pub(super) async fn register(
    State(state): State<AppState>,
    Json(body): Json<Registration>,
) -> Result<Json<TokenResponse>, ApiError> {
    if body.username.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation(
            "username, email and password are required".into(),
        ));
    }

    if state.store.find_user_by_email(&body.email).await?.is_some() {
        return Err(ApiError::Validation("User already exists".into()));
    }

    let password_hash = auth::hash_password(body.password).await?;
    let user = state
        .store
        .create_user(&body.username, &body.email, &password_hash)
        .await?;

    let token = auth::create_token(
        &state.config.auth.jwt_secret,
        user.id,
        state.config.auth.token_ttl_secs,
    )?;
    tracing::info!(user_id = user.id, "user registered");
    Ok(Json(TokenResponse { token }))
}

/// POST /api/auth/login
pub(super) async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    // Unknown email and wrong password produce the same response.
    let Some(user) = state.store.find_user_by_email(&body.email).await? else {
        return Err(ApiError::Validation("Invalid Credentials".into()));
    };

    if !auth::verify_password(body.password, user.password_hash.clone()).await? {
        return Err(ApiError::Validation("Invalid Credentials".into()));
    }

    let token = auth::create_token(
        &state.config.auth.jwt_secret,
        user.id,
        state.config.auth.token_ttl_secs,
    )?;
    Ok(Json(TokenResponse { token }))
}

/// GET /api/auth/user
pub(super) async fn current_user(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state
        .store
        .get_user_profile(user.id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(profile))
}
