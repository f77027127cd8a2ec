//! Beverage catalog API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/beverages | GET | 饮品列表 (`?includeInactive=true`) |
//! | /api/beverages | POST | 创建饮品 (可带规格) |
//! | /api/beverages/{id} | GET / PUT / PATCH / DELETE | 单个饮品 |
//! | /api/beverages/{id}/sizes | POST | 新增规格 |
//! | /api/beverages/{id}/sizes/{size_id} | PUT / PATCH / DELETE | 单个规格 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/beverages", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/sizes", post(handler::create_size))
        .route(
            "/{id}/sizes/{size_id}",
            put(handler::update_size)
                .patch(handler::update_size)
                .delete(handler::delete_size),
        )
}
