//! Order API Handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::{ConfirmationOptions, confirmation, create_order};
use crate::utils::validation::{
    MAX_CUSTOMER_NAME_LEN, MAX_EMAIL_LEN, MAX_ITEM_NOTE_LEN, MAX_NOTE_LEN, validate_optional_text, validate_payload,
    validate_required_text,
};
use crate::middleware::PlacedOrder;
use crate::utils::{AppError, AppJson, AppPath, AppResult, ErrorCode};
use shared::models::{OrderCreate, OrderDetail};

/// GET /api/orders - 获取所有订单 (最新在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderDetail>>> {
    let orders = order::find_all(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::OrderNotFound,
            format!("Order with ID {id} not found"),
        )
    })?;
    Ok(Json(detail))
}

/// GET /api/orders/confirmation/{confirmation_number} - 按确认号查询
pub async fn get_by_confirmation(
    State(state): State<ServerState>,
    AppPath(confirmation_number): AppPath<String>,
) -> AppResult<Json<OrderDetail>> {
    let not_found = || {
        AppError::with_message(
            ErrorCode::OrderNotFound,
            format!("Order with confirmation number {confirmation_number} not found"),
        )
    };
    // 格式不对的确认号不可能存在，不查库
    if !confirmation::is_well_formed(&confirmation_number) {
        return Err(not_found());
    }
    let detail = order::find_by_confirmation(&state.pool, &confirmation_number)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(detail))
}

/// POST /api/orders - 下单
pub async fn create(
    State(state): State<ServerState>,
    AppJson(mut payload): AppJson<OrderCreate>,
) -> AppResult<(StatusCode, Extension<PlacedOrder>, Json<OrderDetail>)> {
    payload.normalize();
    validate_payload(&payload)?;
    validate_required_text(&payload.customer_name, "customerName", MAX_CUSTOMER_NAME_LEN)?;
    validate_required_text(&payload.customer_contact, "customerContact", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.special_instructions, "specialInstructions", MAX_NOTE_LEN)?;
    for item in &payload.items {
        validate_optional_text(&item.notes, "notes", MAX_ITEM_NOTE_LEN)?;
    }

    let options = ConfirmationOptions::from(&state.config);
    let detail = create_order(&state.pool, &options, &payload).await?;
    Ok((StatusCode::CREATED, Extension(PlacedOrder::from(&detail)), Json(detail)))
}
