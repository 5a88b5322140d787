use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use canvas_api::{HealthResponse, InstanceRecord, InventoryDocument, ServerState};
use canvas_client::{ClientError, DiscoveryClient};
use serde_json::json;

fn inventory() -> InventoryDocument {
    InventoryDocument {
        loadbalancer: vec![InstanceRecord {
            provider: "aws".to_string(),
            public_dns: Some("lb.example.com".to_string()),
            public_ip: Some("203.0.113.7".to_string()),
            private_ip: Some("10.0.0.7".to_string()),
            id: "i-lb".to_string(),
            operational_state: "active".to_string(),
            activation_state: "running".to_string(),
            tags: BTreeMap::from([("PRIMARY".to_string(), "true".to_string())]),
        }],
        ..InventoryDocument::default()
    }
}

// Stands in for the daemon; `broken` answers the IP query with a fleet error
async fn data(Path(query): Path<String>) -> Response {
    match query.as_str() {
        "ping" => "pong".into_response(),
        "get_all_instances" => Json(inventory()).into_response(),
        "get_public_ip_primary_loadbalancer" => "203.0.113.7".into_response(),
        "enable_verbose_logging" => "verbose logging enabled".into_response(),
        "disable_verbose_logging" => "verbose logging disabled".into_response(),
        "broken" => "no running load balancer is tagged PRIMARY=true".into_response(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "code": "UNKNOWN_QUERY", "message": format!("unknown query: {other}") })),
        )
            .into_response(),
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        state: ServerState::Ready,
        last_refresh: None,
        refresh_cycles: 3,
        refresh_failures: 1,
        last_error: None,
    })
}

async fn serve() -> DiscoveryClient {
    let app = Router::new()
        .route("/data/{query}", get(data))
        .route("/health", get(health));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    DiscoveryClient::new(format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn test_ping_and_health() {
    let client = serve().await;

    assert_eq!(client.ping().await.unwrap(), "pong");

    let health = client.health().await.unwrap();
    assert_eq!(health.state, ServerState::Ready);
    assert_eq!(health.refresh_cycles, 3);
    assert_eq!(health.refresh_failures, 1);
}

#[tokio::test]
async fn test_inventory_and_primary_ip() {
    let client = serve().await;

    assert_eq!(client.all_instances().await.unwrap(), inventory());
    assert_eq!(
        client.primary_load_balancer_ip().await.unwrap().to_string(),
        "203.0.113.7"
    );
}

#[tokio::test]
async fn test_verbose_toggle() {
    let client = serve().await;

    assert_eq!(
        client.set_verbose_logging(true).await.unwrap(),
        "verbose logging enabled"
    );
    assert_eq!(
        client.set_verbose_logging(false).await.unwrap(),
        "verbose logging disabled"
    );
}

#[tokio::test]
async fn test_unknown_query_is_api_error() {
    let client = serve().await;

    match client.query("drop_tables").await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "unknown query: drop_tables");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_fleet_error_body_is_returned_verbatim() {
    let client = serve().await;

    assert_eq!(
        client.query("broken").await.unwrap(),
        "no running load balancer is tagged PRIMARY=true"
    );
}
