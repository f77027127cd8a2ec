//! Order Repository (customer_order + order_item)

use std::collections::HashMap;

use super::RepoResult;
use crate::orders::money::to_f64;
use crate::orders::snapshot::ItemSnapshot;
use shared::models::{Order, OrderDetail, OrderItem, OrderStatus};
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_COLUMNS: &str = "id, confirmation_number, customer_name, customer_contact, \
     special_instructions, total_price, status, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, beverage_id, beverage_size_id, beverage_name, \
     beverage_size, unit_price, quantity, subtotal, notes";

/// Order header as written by the assembly step
#[derive(Debug, Clone)]
pub struct NewOrder<'a> {
    pub confirmation_number: &'a str,
    pub customer_name: &'a str,
    pub customer_contact: &'a str,
    pub special_instructions: Option<&'a str>,
    pub total_price: f64,
    pub created_at: i64,
}

/// Insert the order row. A taken confirmation number surfaces as `RepoError::Duplicate`.
pub async fn insert_order(conn: &mut SqliteConnection, order: &NewOrder<'_>) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO customer_order (confirmation_number, customer_name, customer_contact, \
         special_instructions, total_price, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(order.confirmation_number)
    .bind(order.customer_name)
    .bind(order.customer_contact)
    .bind(order.special_instructions)
    .bind(order.total_price)
    .bind(OrderStatus::Pending)
    .bind(order.created_at)
    .bind(order.created_at)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    item: &ItemSnapshot,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO order_item (order_id, beverage_id, beverage_size_id, beverage_name, \
         beverage_size, unit_price, quantity, subtotal, notes) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(order_id)
    .bind(item.beverage_id)
    .bind(item.beverage_size_id)
    .bind(&item.beverage_name)
    .bind(&item.beverage_size)
    .bind(to_f64(item.unit_price))
    .bind(item.quantity)
    .bind(to_f64(item.subtotal))
    .bind(&item.notes)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// All orders, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OrderDetail>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM customer_order ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_item ORDER BY order_id, id"
    ))
    .fetch_all(pool)
    .await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderDetail::new(order, items)
        })
        .collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let mut conn = pool.acquire().await?;
    find_detail(&mut conn, id).await
}

pub async fn find_by_confirmation(
    pool: &SqlitePool,
    confirmation_number: &str,
) -> RepoResult<Option<OrderDetail>> {
    let mut conn = pool.acquire().await?;
    let id: Option<i64> =
        sqlx::query_scalar("SELECT id FROM customer_order WHERE confirmation_number = ?")
            .bind(confirmation_number)
            .fetch_optional(&mut *conn)
            .await?;
    match id {
        Some(id) => find_detail(&mut conn, id).await,
        None => Ok(None),
    }
}

/// Order with items, on an existing connection (usable inside a transaction)
pub async fn find_detail(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<OrderDetail>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM customer_order WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(order) = order else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_item WHERE order_id = ? ORDER BY id"
    ))
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(OrderDetail::new(order, items)))
}

/// (orders, order items)
pub async fn count(pool: &SqlitePool) -> RepoResult<(i64, i64)> {
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer_order")
        .fetch_one(pool)
        .await?;
    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item")
        .fetch_one(pool)
        .await?;
    Ok((orders, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepoError;
    use crate::db::test_support::test_pool;
    use rust_decimal::Decimal;

    fn snapshot(name: &str, size: &str, price: Decimal, qty: i32) -> ItemSnapshot {
        ItemSnapshot {
            beverage_id: 1,
            beverage_size_id: 1,
            beverage_name: name.into(),
            beverage_size: size.into(),
            unit_price: price,
            quantity: qty,
            subtotal: price * Decimal::from(qty),
            notes: None,
        }
    }

    fn header(number: &str, created_at: i64) -> NewOrder<'_> {
        NewOrder {
            confirmation_number: number,
            customer_name: "Ann",
            customer_contact: "ann@example.com",
            special_instructions: None,
            total_price: 4.0,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let id = insert_order(&mut conn, &header("LS-1-AAAAAAAA", 1)).await.unwrap();
        insert_item(
            &mut conn,
            id,
            &snapshot("Classic Lemonade", "Small", Decimal::new(200, 2), 2),
        )
        .await
        .unwrap();
        drop(conn);

        let detail = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(detail.order.status, OrderStatus::Pending);
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].subtotal, 4.0);
        assert_eq!(detail.summary, "2x Classic Lemonade (Small)");

        let by_number = find_by_confirmation(&pool, "LS-1-AAAAAAAA")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_number.order.id, id);
        assert!(find_by_confirmation(&pool, "LS-0-NOPE0000").await.unwrap().is_none());
        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_confirmation_number_is_unique() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert_order(&mut conn, &header("LS-1-AAAAAAAA", 1)).await.unwrap();
        let err = insert_order(&mut conn, &header("LS-1-AAAAAAAA", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let old = insert_order(&mut conn, &header("LS-1-OLD00000", 100)).await.unwrap();
        let new = insert_order(&mut conn, &header("LS-2-NEW00000", 200)).await.unwrap();
        insert_item(&mut conn, new, &snapshot("Pink Lemonade", "Large", Decimal::new(450, 2), 1))
            .await
            .unwrap();
        drop(conn);

        let all = find_all(&pool).await.unwrap();
        let ids: Vec<_> = all.iter().map(|o| o.order.id).collect();
        assert_eq!(ids, vec![new, old]);
        assert_eq!(all[0].items.len(), 1);
        assert!(all[1].items.is_empty());
        assert_eq!(all[1].summary, "No items");
    }

    #[tokio::test]
    async fn test_deleting_order_cascades_items() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let id = insert_order(&mut conn, &header("LS-1-AAAAAAAA", 1)).await.unwrap();
        insert_item(&mut conn, id, &snapshot("Classic Lemonade", "Small", Decimal::TWO, 1))
            .await
            .unwrap();
        sqlx::query("DELETE FROM customer_order WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .unwrap();
        drop(conn);
        assert_eq!(count(&pool).await.unwrap(), (0, 0));
    }
}
