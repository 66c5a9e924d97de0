//! Router-level tests: the domain API mounted under `/api` plus the
//! health, readiness and docs endpoints added by the server.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use core_config::{Environment, app_info, server::ServerConfig};
use domain_vector_index::{IndexConfig, VectorIndexService};
use http_body_util::BodyExt;
use quotes_vector_index::{Config, build_router};
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn config(dimension: usize) -> Config {
    Config {
        app: app_info!(),
        environment: Environment::Development,
        server: ServerConfig::default(),
        index: IndexConfig::new(dimension),
        shutdown_timeout: Duration::from_secs(1),
    }
}

fn app(service: &VectorIndexService) -> Router {
    let config = config(service.dimension());
    temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
        build_router(&config, service.clone()).unwrap()
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let service = VectorIndexService::new(IndexConfig::new(2));
    let response = app(&service).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["name"], "quotes_vector_index");
}

#[tokio::test]
async fn test_ready_reports_entry_count() {
    let service = VectorIndexService::new(IndexConfig::new(2));
    service.add_embedding("q1".into(), vec![1.0, 0.0]).await.unwrap();

    let response = app(&service).oneshot(get("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "status": "ready", "dimension": 2, "entries": 1 }));
}

#[tokio::test]
async fn test_api_routes_are_nested() {
    let service = VectorIndexService::new(IndexConfig::new(2));
    let router = app(&service);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/add_embedding",
            json!({ "quote_id": "q1", "embedding": [1.0, 0.0] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(post_json("/api/search", json!({ "embedding": [1.0, 0.0], "top_k": 1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, json!({ "results": ["q1"] }));
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let service = VectorIndexService::new(IndexConfig::new(2));
    let response = app(&service).oneshot(get("/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_openapi_document_lists_index_paths() {
    let service = VectorIndexService::new(IndexConfig::new(2));
    let response = app(&service)
        .oneshot(get("/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert!(body["paths"].get("/api/add_embedding").is_some());
    assert!(body["paths"].get("/api/search").is_some());
}
