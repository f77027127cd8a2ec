//! Beverage API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, beverage};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SIZE_LABEL_LEN, validate_optional_text, validate_payload,
    validate_price, validate_required_text,
};
use crate::utils::{AppError, AppJson, AppPath, AppQuery, AppResult, ErrorCode};
use shared::models::{
    BeverageCreate, BeverageDetail, BeverageListQuery, BeverageSize, BeverageSizeCreate,
    BeverageSizeUpdate, BeverageUpdate,
};

/// Catalog repository errors → catalog error codes
fn beverage_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::BeverageNotFound, msg),
        RepoError::Duplicate(msg) if msg.starts_with(beverage::SIZE_EXISTS) => {
            AppError::with_message(ErrorCode::SizeNameExists, msg)
        }
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::BeverageNameExists, msg),
        other => other.into(),
    }
}

fn size_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::SizeNotFound, msg),
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::SizeNameExists, msg),
        other => other.into(),
    }
}

fn validate_size_create(size: &BeverageSizeCreate) -> AppResult<()> {
    validate_required_text(&size.size, "size", MAX_SIZE_LABEL_LEN)?;
    validate_price(size.price)
}

/// The parent beverage must exist before a size can be touched
async fn require_beverage(state: &ServerState, id: i64) -> AppResult<BeverageDetail> {
    beverage::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BeverageNotFound,
                format!("Beverage with ID {id} not found"),
            )
        })
}

/// GET /api/beverages - 获取饮品列表
///
/// 默认只返回上架饮品及可售规格；`includeInactive=true` 返回全部
pub async fn list(
    State(state): State<ServerState>,
    AppQuery(query): AppQuery<BeverageListQuery>,
) -> AppResult<Json<Vec<BeverageDetail>>> {
    let beverages = beverage::find_all(&state.pool, query.include_inactive).await?;
    Ok(Json(beverages))
}

/// GET /api/beverages/{id} - 获取单个饮品
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<BeverageDetail>> {
    let detail = require_beverage(&state, id).await?;
    Ok(Json(detail))
}

/// POST /api/beverages - 创建饮品
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<BeverageCreate>,
) -> AppResult<(StatusCode, Json<BeverageDetail>)> {
    validate_payload(&payload)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    for size in &payload.sizes {
        validate_size_create(size)?;
    }

    let detail = beverage::create(&state.pool, payload)
        .await
        .map_err(beverage_error)?;

    tracing::info!(
        beverage_id = detail.beverage.id,
        name = %detail.beverage.name,
        sizes = detail.sizes.len(),
        "Beverage created"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT|PATCH /api/beverages/{id} - 更新饮品
pub async fn update(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<BeverageUpdate>,
) -> AppResult<Json<BeverageDetail>> {
    validate_payload(&payload)?;
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(description) = &payload.description {
        validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    }

    let detail = beverage::update(&state.pool, id, payload)
        .await
        .map_err(beverage_error)?;

    tracing::info!(beverage_id = id, "Beverage updated");
    Ok(Json(detail))
}

/// DELETE /api/beverages/{id} - 删除饮品 (规格级联删除)
pub async fn delete(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    beverage::delete(&state.pool, id)
        .await
        .map_err(beverage_error)?;
    tracing::info!(beverage_id = id, "Beverage deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/beverages/{id}/sizes - 新增规格
pub async fn create_size(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<BeverageSizeCreate>,
) -> AppResult<(StatusCode, Json<BeverageSize>)> {
    validate_payload(&payload)?;
    validate_size_create(&payload)?;
    require_beverage(&state, id).await?;

    let size = beverage::create_size(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => beverage_error(e),
            other => size_error(other),
        })?;

    tracing::info!(beverage_id = id, size_id = size.id, size = %size.size, "Beverage size created");
    Ok((StatusCode::CREATED, Json(size)))
}

/// PUT|PATCH /api/beverages/{id}/sizes/{size_id} - 更新规格
pub async fn update_size(
    State(state): State<ServerState>,
    AppPath((id, size_id)): AppPath<(i64, i64)>,
    AppJson(payload): AppJson<BeverageSizeUpdate>,
) -> AppResult<Json<BeverageSize>> {
    validate_payload(&payload)?;
    if let Some(label) = &payload.size {
        validate_required_text(label, "size", MAX_SIZE_LABEL_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    require_beverage(&state, id).await?;

    let size = beverage::update_size(&state.pool, id, size_id, payload)
        .await
        .map_err(size_error)?;

    tracing::info!(beverage_id = id, size_id, "Beverage size updated");
    Ok(Json(size))
}

/// DELETE /api/beverages/{id}/sizes/{size_id} - 删除规格
pub async fn delete_size(
    State(state): State<ServerState>,
    AppPath((id, size_id)): AppPath<(i64, i64)>,
) -> AppResult<StatusCode> {
    require_beverage(&state, id).await?;
    beverage::delete_size(&state.pool, id, size_id)
        .await
        .map_err(size_error)?;
    tracing::info!(beverage_id = id, size_id, "Beverage size deleted");
    Ok(StatusCode::NO_CONTENT)
}
