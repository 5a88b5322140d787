//! `/data/{query}` endpoint

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use canvas_core::QueryOutput;
use tracing::warn;

use crate::api::error::{ApiError, AppError};
use crate::state::AppState;

/// Answer an allow-listed query from the installed snapshot
///
/// `get_all_instances` answers with JSON, everything else with plain text.
/// The whole remaining path is the query name, so `ping/extra` is rejected by
/// the allow-list rather than by routing.
#[utoipa::path(
    get,
    path = "/data/{query}",
    tag = "data",
    params(("query" = String, Path, description = "Allow-listed query name")),
    responses(
        (
            status = 200,
            description = "Plain text answer; `get_all_instances` answers with JSON",
            body = String
        ),
        (
            status = 500,
            description = "Unknown query or inventory not yet initialized",
            body = ApiError
        )
    )
)]
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> Result<Response, AppError> {
    answer(&state, &query).await
}

/// `/data/` with no name at all
pub async fn get_empty_data(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    answer(&state, "").await
}

async fn answer(state: &AppState, query: &str) -> Result<Response, AppError> {
    let response = match state.queries.query(query).await? {
        QueryOutput::Text(text) => text.into_response(),
        QueryOutput::Inventory(doc) => Json(doc).into_response(),
        QueryOutput::FleetError(e) => {
            warn!(%query, error = %e, "fleet configuration error");
            e.to_string().into_response()
        }
    };
    Ok(response)
}
