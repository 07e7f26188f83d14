// HTTP routes

mod agents;
mod auth;
mod http;
mod metrics;

use axum::http::{HeaderName, Method, header};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::MetricsProbe;
use crate::config::AppConfig;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub probe: Arc<dyn MetricsProbe>,
    pub config: AppConfig,
}

pub fn app(store: Arc<Store>, probe: Arc<dyn MetricsProbe>, config: AppConfig) -> Router {
    let state = AppState {
        store,
        probe,
        config,
    };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-auth-token"),
        ]);
    Router::new()
        .route("/", get(|| async { "Monitoring API is running" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/auth/register", post(auth::register)) // POST /api/auth/register
        .route("/api/auth/login", post(auth::login)) // POST /api/auth/login
        .route("/api/auth/user", get(auth::current_user)) // GET /api/auth/user
        .route("/api/agents", post(agents::create).get(agents::list))
        .route(
            "/api/agents/{id}",
            get(agents::get_by_id)
                .put(agents::update)
                .delete(agents::delete),
        )
        .route("/api/metrics", get(metrics::snapshot)) // GET /api/metrics
        .layer(cors)
        .with_state(state)
}
