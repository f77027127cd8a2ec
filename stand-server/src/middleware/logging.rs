//! 请求日志中间件
//!
//! 每个请求结束时记一条日志：请求 ID、路由模板、状态码、延迟，
//! 以及处理器/错误通过响应扩展带出的业务字段 (错误码、确认号)。

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use shared::error::ErrorCode;
use shared::models::OrderDetail;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 下单成功后由处理器放入响应扩展
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub confirmation_number: String,
    pub items: i64,
    pub total: f64,
}

impl From<&OrderDetail> for PlacedOrder {
    fn from(detail: &OrderDetail) -> Self {
        Self {
            order_id: detail.order.id,
            confirmation_number: detail.order.confirmation_number.clone(),
            items: detail.items_count,
            total: detail.order.total_price,
        }
    }
}

/// 请求日志中间件
///
/// - 5xx → `warn`，附带错误码
/// - 4xx → `info`，附带错误码 (例如 4004 规格不可售)
/// - 下单成功 → `info`，附带订单 ID、确认号、总价
/// - 其余成功请求 → `debug`
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status();
    let error_code = response.extensions().get::<ErrorCode>().map(ErrorCode::code);

    if status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            error_code,
            latency_ms,
            "Request failed"
        );
    } else if status.is_client_error() {
        info!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            error_code,
            latency_ms,
            "Request rejected"
        );
    } else if let Some(order) = response.extensions().get::<PlacedOrder>() {
        info!(
            request_id = %request_id,
            order_id = order.order_id,
            confirmation_number = %order.confirmation_number,
            items = order.items,
            total = order.total,
            latency_ms,
            "Order placed"
        );
    } else {
        debug!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        );
    }

    response
}
