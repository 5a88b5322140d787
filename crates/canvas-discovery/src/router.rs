//! HTTP router configuration

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::api::{data, system};
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Query endpoint
        .route("/data/", get(data::get_empty_data))
        .route("/data/{*query}", get(data::get_data))
        // System endpoints
        .route("/health", get(system::health))
        .route("/openapi.json", get(system::openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use canvas_api::{HealthResponse, InventoryDocument, ServerState};
    use canvas_core::{QueryService, SnapshotCell, Verbosity, status_channel};
    use canvas_inventory::{ActivationState, Instance, InventorySnapshot, ProviderKind};
    use tower::ServiceExt;

    fn load_balancer(id: &str, ip: &str, primary: bool) -> Instance {
        let builder = Instance::builder(ProviderKind::Aws, id)
            .activation_state(ActivationState::Running)
            .public_ip(Some(ip.to_string()));
        if primary {
            builder.tag("PRIMARY", "true").build()
        } else {
            builder.build()
        }
    }

    async fn app(snapshot: Option<InventorySnapshot>) -> (Router, Verbosity) {
        let cell = Arc::new(SnapshotCell::new());
        if let Some(snapshot) = snapshot {
            cell.install(snapshot).await;
        }
        let verbosity = Verbosity::default();
        let (_tx, status) = status_channel();
        let state = AppState::new(QueryService::new(cell, verbosity.clone()), status);
        (create_router(Arc::new(state)), verbosity)
    }

    async fn get(app: Router, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_ping_before_first_refresh() {
        let (app, _) = app(None).await;
        let response = get(app, "/data/ping").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        assert_eq!(body_text(response).await, "pong");
    }

    #[tokio::test]
    async fn test_uninitialized_is_server_error() {
        let (app, _) = app(None).await;
        let response = get(app, "/data/get_all_instances").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("UNINITIALIZED"));
    }

    #[tokio::test]
    async fn test_unknown_query_is_server_error() {
        let (app, _) = app(Some(InventorySnapshot::new(vec![], vec![], vec![]))).await;
        let response = get(app, "/data/drop_tables").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.contains("UNKNOWN_QUERY"));
        assert!(body.contains("drop_tables"));
    }

    #[tokio::test]
    async fn test_empty_query_name_is_server_error() {
        let (app, _) = app(None).await;
        let response = get(app, "/data/").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("UNKNOWN_QUERY"));
    }

    #[tokio::test]
    async fn test_nested_query_name_is_server_error() {
        let (app, _) = app(None).await;
        let response = get(app, "/data/ping/extra").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.contains("UNKNOWN_QUERY"));
        assert!(body.contains("ping/extra"));
    }

    #[tokio::test]
    async fn test_all_instances_as_json() {
        let snapshot =
            InventorySnapshot::new(vec![load_balancer("i-1", "1.2.3.4", true)], vec![], vec![]);
        let expected = snapshot.to_document();
        let (app, _) = app(Some(snapshot)).await;
        let response = get(app, "/data/get_all_instances").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let doc: InventoryDocument = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(doc, expected);
    }

    #[tokio::test]
    async fn test_primary_ip_is_plain_text() {
        let snapshot = InventorySnapshot::new(
            vec![
                load_balancer("i-1", "1.2.3.4", false),
                load_balancer("i-2", "5.6.7.8", true),
            ],
            vec![],
            vec![],
        );
        let (app, _) = app(Some(snapshot)).await;
        let response = get(app, "/data/get_public_ip_primary_loadbalancer").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "5.6.7.8");
    }

    #[tokio::test]
    async fn test_fleet_error_is_ok_with_message() {
        let snapshot =
            InventorySnapshot::new(vec![load_balancer("i-1", "1.2.3.4", false)], vec![], vec![]);
        let (app, _) = app(Some(snapshot)).await;
        let response = get(app, "/data/get_public_ip_primary_loadbalancer").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("PRIMARY=true"));
    }

    #[tokio::test]
    async fn test_verbose_toggle() {
        let (app, verbosity) = app(None).await;

        let response = get(app.clone(), "/data/enable_verbose_logging").await;
        assert_eq!(body_text(response).await, "verbose logging enabled");
        assert!(verbosity.is_verbose());

        let response = get(app, "/data/disable_verbose_logging").await;
        assert_eq!(body_text(response).await, "verbose logging disabled");
        assert!(!verbosity.is_verbose());
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(None).await;
        let response = get(app, "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.state, ServerState::Uninitialized);
        assert_eq!(health.refresh_cycles, 0);
        assert!(health.last_refresh.is_none());
    }

    #[tokio::test]
    async fn test_openapi_lists_routes() {
        let (app, _) = app(None).await;
        let response = get(app, "/openapi.json").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("/data/{query}"));
        assert!(body.contains("/health"));
    }
}
