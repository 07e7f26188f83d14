// GET /api/metrics — one host utilization snapshot per request

use axum::Json;
use axum::extract::State;
use std::time::Duration;

use super::AppState;
use crate::aggregator;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::MetricsSnapshot;

pub(super) async fn snapshot(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MetricsSnapshot>, ApiError> {
    let source_timeout = Duration::from_millis(state.config.metrics.source_timeout_ms);
    let snapshot = aggregator::collect_snapshot(state.probe.as_ref(), source_timeout)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(snapshot))
}
