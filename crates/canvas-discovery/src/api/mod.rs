//! API route handlers

use utoipa::OpenApi;

pub mod data;
pub mod error;
pub mod system;

pub use error::{ApiError, AppError};

#[derive(OpenApi)]
#[openapi(
    info(title = "canvas-discovery", description = "Cloud inventory discovery service"),
    paths(data::get_data, system::health),
    components(schemas(
        ApiError,
        canvas_api::HealthResponse,
        canvas_api::ServerState,
        canvas_api::InventoryDocument,
        canvas_api::InstanceRecord,
        canvas_api::QueryName
    ))
)]
pub struct ApiDoc;
