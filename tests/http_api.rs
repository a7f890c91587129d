use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use dex_routing::server::router;
use dex_routing::{DexRoutingService, FixturePairSource, PairRecord, PairSource, RoutingError, RoutingResult};
use serde_json::{json, Value};
use std::sync::Arc;

struct UnavailableSource;

#[async_trait]
impl PairSource for UnavailableSource {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn list_pools(&self) -> RoutingResult<Vec<PairRecord>> {
        Err(RoutingError::SnapshotUnavailable("upstream timeout".to_string()))
    }
}

fn fixture_server() -> TestServer {
    let service = DexRoutingService::new(Arc::new(FixturePairSource::new()));
    TestServer::new(router(service)).unwrap()
}

fn route_paths(routes: &Value) -> Vec<String> {
    routes
        .as_array()
        .unwrap()
        .iter()
        .map(|route| {
            let edges = route.as_array().unwrap();
            let mut tokens: Vec<&str> = edges
                .iter()
                .map(|edge| edge["fromToken"].as_str().unwrap())
                .collect();
            if let Some(last) = edges.last() {
                tokens.push(last["toToken"].as_str().unwrap());
            }
            tokens.join(" -> ")
        })
        .collect()
}

#[tokio::test]
async fn test_list_all_routes_doge_to_btc() {
    let server = fixture_server();
    let response = server.get("/routes/from/DOGE/to/BTC").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["fromToken"], "DOGE");
    assert_eq!(body["toToken"], "BTC");
    assert_eq!(
        route_paths(&body["routes"]),
        vec![
            "DOGE -> DFI -> ETH -> BTC",
            "DOGE -> DFI -> BTC",
            "DOGE -> ETH -> DFI -> BTC",
            "DOGE -> ETH -> BTC",
        ]
    );

    let first_edge = &body["routes"][0][0];
    assert_eq!(first_edge["pairSymbol"], "DOGE-DFI");
    assert_eq!(first_edge["direction"], "forward");
    assert!(first_edge["perUnitRate"].is_number());
}

#[tokio::test]
async fn test_best_route_doge_to_btc() {
    let server = fixture_server();
    let response = server.get("/routes/best/from/DOGE/to/BTC").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(route_paths(&json!([body["bestRoute"]])), vec!["DOGE -> ETH -> BTC"]);

    let estimated = body["estimatedReturn"].as_f64().unwrap();
    assert!((estimated - 1.0 / 2_457_444.0).abs() < 1e-15);
}

#[tokio::test]
async fn test_unknown_token_returns_empty_result() {
    let server = fixture_server();

    let all: Value = server.get("/routes/from/UNKNOWN/to/BTC").await.json();
    assert_eq!(all["routes"], json!([]));

    let best: Value = server.get("/routes/best/from/UNKNOWN/to/BTC").await.json();
    assert_eq!(best["bestRoute"], json!([]));
    assert_eq!(best["estimatedReturn"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_identity_route() {
    let server = fixture_server();

    let all: Value = server.get("/routes/from/ETH/to/ETH").await.json();
    assert_eq!(all["routes"], json!([[]]));

    let best: Value = server.get("/routes/best/from/ETH/to/ETH").await.json();
    assert_eq!(best["bestRoute"], json!([]));
    assert_eq!(best["estimatedReturn"].as_f64(), Some(1.0));
}

#[tokio::test]
async fn test_snapshot_failure_returns_503() {
    let service = DexRoutingService::new(Arc::new(UnavailableSource));
    let server = TestServer::new(router(service)).unwrap();

    let response = server.get("/routes/best/from/DOGE/to/BTC").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("upstream timeout"));
}

#[tokio::test]
async fn test_health() {
    let server = fixture_server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "ok");
}
