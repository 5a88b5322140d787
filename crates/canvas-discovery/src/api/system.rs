//! System endpoints: health and OpenAPI document

use std::sync::Arc;

use axum::{Json, extract::State};
use canvas_api::HealthResponse;
use utoipa::OpenApi;

use crate::api::ApiDoc;
use crate::state::AppState;

/// Daemon and poller health
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Daemon health", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // Clone out of the watch guard before awaiting
    let status = state.status.borrow().clone();
    let server_state = state.queries.state().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        state: server_state,
        last_refresh: status.last_success,
        refresh_cycles: status.cycles,
        refresh_failures: status.failures,
        last_error: status.last_error,
    })
}

/// Generated OpenAPI document
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
