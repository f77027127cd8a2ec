//! Order API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | GET | 订单列表 (最新在前) |
//! | /api/orders | POST | 下单 |
//! | /api/orders/{id} | GET | 单个订单 |
//! | /api/orders/confirmation/{confirmation_number} | GET | 按确认号查询 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route(
            "/confirmation/{confirmation_number}",
            get(handler::get_by_confirmation),
        )
}
