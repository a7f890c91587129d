use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::core::{AllRoutesResult, BestRouteResult};
use crate::error::RoutingError;
use crate::routing_service::DexRoutingService;

#[derive(Clone)]
pub struct AppState {
    pub service: DexRoutingService,
}

/// 快照获取失败时返回 503
pub struct ApiError(RoutingError);

impl From<RoutingError> for ApiError {
    fn from(err: RoutingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("路由查询失败: {}", self.0);
        let body = Json(json!({ "error": self.0.to_string() }));
        (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
    }
}

async fn list_all_routes(
    State(state): State<AppState>,
    Path((from_token, to_token)): Path<(String, String)>,
) -> Result<Json<AllRoutesResult>, ApiError> {
    info!("GET 所有路径 {} -> {}", from_token, to_token);
    let result = state.service.list_all_routes(&from_token, &to_token).await?;
    Ok(Json(result))
}

async fn get_best_route(
    State(state): State<AppState>,
    Path((from_token, to_token)): Path<(String, String)>,
) -> Result<Json<BestRouteResult>, ApiError> {
    info!("GET 最优路径 {} -> {}", from_token, to_token);
    let result = state.service.get_best_route(&from_token, &to_token).await?;
    Ok(Json(result))
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(service: DexRoutingService) -> Router {
    Router::new()
        .route("/routes/from/{from_token}/to/{to_token}", get(list_all_routes))
        .route("/routes/best/from/{from_token}/to/{to_token}", get(get_best_route))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(AppState { service })
}

/// 启动 HTTP 服务，直到进程退出
pub async fn serve(config: &ServerConfig, service: DexRoutingService) -> Result<()> {
    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("路由服务已启动: http://{}", bind_addr);

    axum::serve(listener, router(service)).await?;
    Ok(())
}
