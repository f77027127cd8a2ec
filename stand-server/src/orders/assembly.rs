//! Order assembly
//!
//! Resolves every requested line against the catalog, snapshots prices,
//! computes the total and persists order + items in a single transaction.
//! Any failure drops the transaction, so nothing is written.

use std::collections::HashMap;

use shared::models::{BeverageDetail, OrderCreate, OrderDetail};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::confirmation;
use super::money::{to_f64, validate_quantity};
use super::snapshot::{ItemSnapshot, order_total};
use super::{OrderError, OrderResult};
use crate::core::Config;
use crate::db::repository::{RepoError, beverage, order};

/// Confirmation number settings
#[derive(Debug, Clone)]
pub struct ConfirmationOptions {
    pub prefix: String,
    pub max_attempts: u32,
}

impl Default for ConfirmationOptions {
    fn default() -> Self {
        Self {
            prefix: "LS".into(),
            max_attempts: 5,
        }
    }
}

impl From<&Config> for ConfirmationOptions {
    fn from(config: &Config) -> Self {
        Self {
            prefix: config.confirmation_prefix.clone(),
            max_attempts: config.confirmation_max_attempts,
        }
    }
}

/// Create an order from a validated, normalized payload
pub async fn create_order(
    pool: &SqlitePool,
    options: &ConfirmationOptions,
    payload: &OrderCreate,
) -> OrderResult<OrderDetail> {
    assemble(pool, options, payload, || {
        confirmation::generate(&options.prefix, now_millis())
    })
    .await
}

async fn assemble<F>(
    pool: &SqlitePool,
    options: &ConfirmationOptions,
    payload: &OrderCreate,
    mut next_number: F,
) -> OrderResult<OrderDetail>
where
    F: FnMut() -> String,
{
    if payload.items.is_empty() {
        return Err(OrderError::Empty);
    }

    // 先拿写锁：延迟事务在读后升级写锁时会直接 SQLITE_BUSY
    let mut tx = pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?;

    // 1. Resolve lines against the catalog as it is right now
    let mut beverages: HashMap<i64, BeverageDetail> = HashMap::new();
    let mut snapshots = Vec::with_capacity(payload.items.len());
    for input in &payload.items {
        validate_quantity(input.quantity).map_err(OrderError::InvalidQuantity)?;

        if !beverages.contains_key(&input.beverage_id) {
            let detail = beverage::find_detail(&mut tx, input.beverage_id)
                .await?
                .ok_or(OrderError::BeverageNotFound(input.beverage_id))?;
            beverages.insert(input.beverage_id, detail);
        }
        let Some(detail) = beverages.get(&input.beverage_id) else {
            return Err(OrderError::BeverageNotFound(input.beverage_id));
        };

        let size = detail.available_size(input.beverage_size_id).ok_or_else(|| {
            OrderError::SizeUnavailable {
                size_id: input.beverage_size_id,
                beverage_name: detail.beverage.name.clone(),
            }
        })?;

        snapshots.push(ItemSnapshot::capture(detail, size, input));
    }

    // 2. Total
    let total = to_f64(order_total(&snapshots));

    // 3. Order row, retrying on confirmation number collisions
    let now = now_millis();
    let mut order_id = None;
    for attempt in 1..=options.max_attempts.max(1) {
        let number = next_number();
        let header = order::NewOrder {
            confirmation_number: &number,
            customer_name: &payload.customer_name,
            customer_contact: &payload.customer_contact,
            special_instructions: payload.special_instructions.as_deref(),
            total_price: total,
            created_at: now,
        };
        match order::insert_order(&mut tx, &header).await {
            Ok(id) => {
                order_id = Some(id);
                break;
            }
            Err(e) if e.is_duplicate() => {
                tracing::warn!(
                    confirmation_number = %number,
                    attempt,
                    "Confirmation number collision, regenerating"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }
    let order_id = order_id.ok_or(OrderError::ConfirmationExhausted(options.max_attempts))?;

    // 4. Item snapshots
    for snapshot in &snapshots {
        order::insert_item(&mut tx, order_id, snapshot).await?;
    }

    let detail = order::find_detail(&mut tx, order_id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Order {order_id} vanished during creation")))?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id = detail.order.id,
        confirmation_number = %detail.order.confirmation_number,
        items = detail.items.len(),
        total = detail.order.total_price,
        "Order created"
    );

    Ok(detail)
}
