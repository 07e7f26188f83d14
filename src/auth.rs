// Bearer token issuance/verification and password hashing.
// Tokens are accepted from `x-auth-token` or `Authorization: Bearer`.

use crate::error::ApiError;
use crate::routes::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

pub fn create_token(secret: &str, user_id: i64, ttl_secs: u64) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// bcrypt is CPU-bound; keep it off the async workers.
pub async fn hash_password(password: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?))
        .await
        .map_err(|e| anyhow::anyhow!("bcrypt task join: {}", e))?
}

pub async fn verify_password(password: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || Ok(bcrypt::verify(password, &hash)?))
        .await
        .map_err(|e| anyhow::anyhow!("bcrypt task join: {}", e))?
}

/// Verified caller identity. Extracting this gates a handler behind a
/// valid bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i64,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    if let Some(token) = parts
        .headers
        .get("x-auth-token")
        .and_then(|v| v.to_str().ok())
    {
        return Some(token);
    }
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts).filter(|t| !t.is_empty()) else {
            return Err(ApiError::Unauthorized("No token, authorization denied"));
        };

        let claims = validate_token(&state.config.auth.jwt_secret, token)
            .map_err(|_| ApiError::Unauthorized("Token is not valid"))?;
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| ApiError::Unauthorized("Token is not valid"))?;
        Ok(AuthUser { id })
    }
}
