//! Application route configuration.

use std::time::Duration;

use axum::{middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{auth_routes, user_routes};
use super::middleware::session_middleware;
use super::AppState;
use crate::config::REQUEST_TIMEOUT_SECONDS;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness only; the directory is not contacted
        .route("/health", get(health))
        // Public pages: home, login, logout
        .merge(auth_routes())
        // Protected pages (require an authenticated session)
        .merge(user_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        )))
        // Global middleware
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECONDS)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
