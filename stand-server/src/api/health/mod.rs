//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/health | GET | 健康检查 (含数据库探测与订单计数) |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "database": "ok", "orders": 12, "orderItems": 30 }
//! ```

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::order;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// 健康检查响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// 状态 (ok | degraded)
    status: &'static str,
    version: &'static str,
    /// 数据库状态 (ok | error)
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    orders: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_items: Option<i64>,
}

/// GET /api/health - 健康检查
///
/// 计数查询同时充当数据库探测
async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION");
    match order::count(&state.pool).await {
        Ok((orders, items)) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version,
                database: "ok",
                orders: Some(orders),
                order_items: Some(items),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    version,
                    database: "error",
                    orders: None,
                    order_items: None,
                }),
            )
        }
    }
}
