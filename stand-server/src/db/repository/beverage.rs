//! Beverage Repository (beverage + beverage_size)

use std::collections::{HashMap, HashSet};

use super::{RepoError, RepoResult};
use shared::models::{
    Beverage, BeverageCreate, BeverageDetail, BeverageSize, BeverageSizeCreate, BeverageSizeUpdate,
    BeverageUpdate,
};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

const BEVERAGE_COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";
const SIZE_COLUMNS: &str = "id, beverage_id, size, price, is_available, created_at, updated_at";

pub const BEVERAGE_NAME_EXISTS: &str = "Beverage with this name already exists";
pub const SIZE_EXISTS: &str = "Size already exists for this beverage";

fn beverage_not_found(id: i64) -> RepoError {
    RepoError::NotFound(format!("Beverage with ID {id} not found"))
}

fn size_not_found() -> RepoError {
    RepoError::NotFound("Size not found for this beverage".into())
}

/// Re-label a unique violation with a readable message
fn duplicate_as(message: &str) -> impl FnOnce(sqlx::Error) -> RepoError + '_ {
    move |err| match RepoError::from(err) {
        RepoError::Duplicate(_) => RepoError::Duplicate(message.to_string()),
        other => other,
    }
}

// ── Queries ─────────────────────────────────────────────────────────

/// List beverages ordered by name, sizes ordered by price.
///
/// Without `include_inactive` only active beverages are returned, each
/// carrying only its available sizes.
pub async fn find_all(pool: &SqlitePool, include_inactive: bool) -> RepoResult<Vec<BeverageDetail>> {
    let beverage_sql = if include_inactive {
        format!("SELECT {BEVERAGE_COLUMNS} FROM beverage ORDER BY name, id")
    } else {
        format!("SELECT {BEVERAGE_COLUMNS} FROM beverage WHERE is_active = 1 ORDER BY name, id")
    };
    let size_sql = if include_inactive {
        format!("SELECT {SIZE_COLUMNS} FROM beverage_size ORDER BY price, id")
    } else {
        format!("SELECT {SIZE_COLUMNS} FROM beverage_size WHERE is_available = 1 ORDER BY price, id")
    };

    let beverages = sqlx::query_as::<_, Beverage>(&beverage_sql)
        .fetch_all(pool)
        .await?;
    let sizes = sqlx::query_as::<_, BeverageSize>(&size_sql)
        .fetch_all(pool)
        .await?;

    let mut by_beverage: HashMap<i64, Vec<BeverageSize>> = HashMap::new();
    for size in sizes {
        by_beverage.entry(size.beverage_id).or_default().push(size);
    }

    Ok(beverages
        .into_iter()
        .map(|beverage| BeverageDetail {
            sizes: by_beverage.remove(&beverage.id).unwrap_or_default(),
            beverage,
        })
        .collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BeverageDetail>> {
    let mut conn = pool.acquire().await?;
    find_detail(&mut conn, id).await
}

/// Beverage with all of its sizes, on an existing connection (usable inside a transaction)
pub async fn find_detail(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<BeverageDetail>> {
    let beverage = sqlx::query_as::<_, Beverage>(&format!(
        "SELECT {BEVERAGE_COLUMNS} FROM beverage WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(beverage) = beverage else {
        return Ok(None);
    };

    let sizes = sqlx::query_as::<_, BeverageSize>(&format!(
        "SELECT {SIZE_COLUMNS} FROM beverage_size WHERE beverage_id = ? ORDER BY price, id"
    ))
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(BeverageDetail { beverage, sizes }))
}

pub async fn find_size(pool: &SqlitePool, beverage_id: i64, size_id: i64) -> RepoResult<Option<BeverageSize>> {
    let size = sqlx::query_as::<_, BeverageSize>(&format!(
        "SELECT {SIZE_COLUMNS} FROM beverage_size WHERE id = ? AND beverage_id = ?"
    ))
    .bind(size_id)
    .bind(beverage_id)
    .fetch_optional(pool)
    .await?;
    Ok(size)
}

async fn beverage_exists(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM beverage WHERE id = ?")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

// ── Beverage writes ─────────────────────────────────────────────────

/// Create a beverage together with its optional initial sizes (one transaction)
pub async fn create(pool: &SqlitePool, data: BeverageCreate) -> RepoResult<BeverageDetail> {
    let mut labels = HashSet::new();
    if let Some(dup) = data.sizes.iter().find(|s| !labels.insert(s.size.trim())) {
        return Err(RepoError::Duplicate(format!("{SIZE_EXISTS}: {}", dup.size.trim())));
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO beverage (name, description, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(duplicate_as(BEVERAGE_NAME_EXISTS))?;

    for size in &data.sizes {
        insert_size(&mut tx, id, size, now).await?;
    }

    let detail = find_detail(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create beverage".into()))?;
    tx.commit().await?;
    Ok(detail)
}

/// Partial update; the name is checked for conflicts only when it changes.
/// `description: Some(None)` clears the description.
pub async fn update(pool: &SqlitePool, id: i64, data: BeverageUpdate) -> RepoResult<BeverageDetail> {
    let mut conn = pool.acquire().await?;
    let current = find_detail(&mut conn, id)
        .await?
        .ok_or_else(|| beverage_not_found(id))?;

    let name = data.name.as_deref().map(str::trim);
    if let Some(name) = name
        && name != current.beverage.name
    {
        let taken: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM beverage WHERE name = ? AND id != ?")
                .bind(name)
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;
        if taken > 0 {
            return Err(RepoError::Duplicate(BEVERAGE_NAME_EXISTS.into()));
        }
    }

    sqlx::query(
        "UPDATE beverage SET name = COALESCE(?1, name), \
         description = CASE WHEN ?2 THEN ?3 ELSE description END, \
         is_active = COALESCE(?4, is_active), updated_at = ?5 WHERE id = ?6",
    )
    .bind(name)
    .bind(data.description.is_some())
    .bind(data.description.flatten())
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(&mut *conn)
    .await
    .map_err(duplicate_as(BEVERAGE_NAME_EXISTS))?;

    find_detail(&mut conn, id)
        .await?
        .ok_or_else(|| beverage_not_found(id))
}

/// Delete a beverage; its sizes go with it (ON DELETE CASCADE)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM beverage WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(beverage_not_found(id));
    }
    Ok(())
}

// ── Size writes ─────────────────────────────────────────────────────

async fn insert_size(
    conn: &mut SqliteConnection,
    beverage_id: i64,
    data: &BeverageSizeCreate,
    now: i64,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO beverage_size (beverage_id, size, price, is_available, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(beverage_id)
    .bind(data.size.trim())
    .bind(data.price)
    .bind(data.is_available.unwrap_or(true))
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await
    .map_err(duplicate_as(SIZE_EXISTS))?;
    Ok(id)
}

/// Add a size to an existing beverage
pub async fn create_size(
    pool: &SqlitePool,
    beverage_id: i64,
    data: BeverageSizeCreate,
) -> RepoResult<BeverageSize> {
    let mut conn = pool.acquire().await?;
    if !beverage_exists(&mut conn, beverage_id).await? {
        return Err(beverage_not_found(beverage_id));
    }
    let id = insert_size(&mut conn, beverage_id, &data, now_millis()).await?;
    drop(conn);
    find_size(pool, beverage_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create size".into()))
}

/// Partial update of a size scoped to its beverage
pub async fn update_size(
    pool: &SqlitePool,
    beverage_id: i64,
    size_id: i64,
    data: BeverageSizeUpdate,
) -> RepoResult<BeverageSize> {
    let result = sqlx::query(
        "UPDATE beverage_size SET size = COALESCE(?1, size), price = COALESCE(?2, price), \
         is_available = COALESCE(?3, is_available), updated_at = ?4 \
         WHERE id = ?5 AND beverage_id = ?6",
    )
    .bind(data.size.as_deref().map(str::trim))
    .bind(data.price)
    .bind(data.is_available)
    .bind(now_millis())
    .bind(size_id)
    .bind(beverage_id)
    .execute(pool)
    .await
    .map_err(duplicate_as(SIZE_EXISTS))?;

    if result.rows_affected() == 0 {
        return Err(size_not_found());
    }
    find_size(pool, beverage_id, size_id)
        .await?
        .ok_or_else(size_not_found)
}

pub async fn delete_size(pool: &SqlitePool, beverage_id: i64, size_id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM beverage_size WHERE id = ? AND beverage_id = ?")
        .bind(size_id)
        .bind(beverage_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(size_not_found());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    fn size(label: &str, price: f64) -> BeverageSizeCreate {
        BeverageSizeCreate {
            size: label.into(),
            price,
            is_available: None,
        }
    }

    fn lemonade(name: &str, sizes: Vec<BeverageSizeCreate>) -> BeverageCreate {
        BeverageCreate {
            name: name.into(),
            description: Some("Fresh squeezed".into()),
            is_active: None,
            sizes,
        }
    }

    #[tokio::test]
    async fn test_create_with_sizes() {
        let pool = test_pool().await;
        let detail = create(
            &pool,
            lemonade("Classic Lemonade", vec![size("Medium", 3.0), size("Small", 2.0)]),
        )
        .await
        .unwrap();

        assert_eq!(detail.beverage.name, "Classic Lemonade");
        assert!(detail.beverage.is_active);
        let labels: Vec<_> = detail.sizes.iter().map(|s| s.size.as_str()).collect();
        assert_eq!(labels, vec!["Small", "Medium"]);
        assert!(detail.sizes.iter().all(|s| s.is_available));
    }

    #[tokio::test]
    async fn test_duplicate_name_persists_nothing() {
        let pool = test_pool().await;
        create(&pool, lemonade("Classic Lemonade", vec![])).await.unwrap();

        let err = create(&pool, lemonade("Classic Lemonade", vec![size("Small", 2.0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ref m) if m == BEVERAGE_NAME_EXISTS));

        let sizes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM beverage_size")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sizes, 0);
        assert_eq!(find_all(&pool, true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_size_labels_in_payload() {
        let pool = test_pool().await;
        let err = create(
            &pool,
            lemonade("Pink Lemonade", vec![size("Small", 2.0), size("Small", 2.5)]),
        )
        .await
        .unwrap_err();
        assert!(err.is_duplicate());
        assert!(find_all(&pool, true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_filters_inactive_and_unavailable() {
        let pool = test_pool().await;
        let active = create(
            &pool,
            lemonade("Classic Lemonade", vec![size("Small", 2.0), size("Large", 4.0)]),
        )
        .await
        .unwrap();
        let mut hidden = lemonade("Arnold Palmer", vec![size("Small", 2.5)]);
        hidden.is_active = Some(false);
        create(&pool, hidden).await.unwrap();

        let large = active.sizes.iter().find(|s| s.size == "Large").unwrap();
        update_size(
            &pool,
            active.beverage.id,
            large.id,
            BeverageSizeUpdate {
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let visible = find_all(&pool, false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].sizes.len(), 1);
        assert_eq!(visible[0].sizes[0].size, "Small");

        let everything = find_all(&pool, true).await.unwrap();
        let names: Vec<_> = everything.iter().map(|b| b.beverage.name.as_str()).collect();
        assert_eq!(names, vec!["Arnold Palmer", "Classic Lemonade"]);
        assert_eq!(everything[1].sizes.len(), 2);
    }

    #[tokio::test]
    async fn test_update_name_conflict_only_when_changed() {
        let pool = test_pool().await;
        let a = create(&pool, lemonade("Classic Lemonade", vec![])).await.unwrap();
        create(&pool, lemonade("Pink Lemonade", vec![])).await.unwrap();

        // Same name: no conflict
        let same = update(
            &pool,
            a.beverage.id,
            BeverageUpdate {
                name: Some("Classic Lemonade".into()),
                description: Some(Some("Updated".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(same.beverage.description.as_deref(), Some("Updated"));

        let err = update(
            &pool,
            a.beverage.id,
            BeverageUpdate {
                name: Some("Pink Lemonade".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_duplicate());

        let err = update(&pool, 999, BeverageUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_description_keep_then_clear() {
        let pool = test_pool().await;
        let a = create(&pool, lemonade("Classic Lemonade", vec![])).await.unwrap();

        let kept = update(
            &pool,
            a.beverage.id,
            BeverageUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(kept.beverage.description.as_deref(), Some("Fresh squeezed"));
        assert!(!kept.beverage.is_active);

        let cleared = update(
            &pool,
            a.beverage.id,
            BeverageUpdate {
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.beverage.description, None);
        assert_eq!(cleared.beverage.name, "Classic Lemonade");
    }

    #[tokio::test]
    async fn test_delete_cascades_sizes() {
        let pool = test_pool().await;
        let detail = create(&pool, lemonade("Classic Lemonade", vec![size("Small", 2.0)]))
            .await
            .unwrap();
        delete(&pool, detail.beverage.id).await.unwrap();

        let sizes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM beverage_size")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sizes, 0);
        assert!(matches!(
            delete(&pool, detail.beverage.id).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_size_crud_scoped_to_beverage() {
        let pool = test_pool().await;
        let a = create(&pool, lemonade("Classic Lemonade", vec![])).await.unwrap();
        let b = create(&pool, lemonade("Pink Lemonade", vec![])).await.unwrap();

        let small = create_size(&pool, a.beverage.id, size("Small", 2.0)).await.unwrap();
        assert_eq!(small.beverage_id, a.beverage.id);

        let err = create_size(&pool, a.beverage.id, size("Small", 9.0)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ref m) if m == SIZE_EXISTS));

        // Same label on another beverage is fine
        create_size(&pool, b.beverage.id, size("Small", 2.0)).await.unwrap();

        let err = create_size(&pool, 999, size("Small", 2.0)).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        // Size belongs to a, not b
        let err = update_size(&pool, b.beverage.id, small.id, BeverageSizeUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        let updated = update_size(
            &pool,
            a.beverage.id,
            small.id,
            BeverageSizeUpdate {
                price: Some(2.25),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 2.25);
        assert_eq!(updated.size, "Small");

        delete_size(&pool, a.beverage.id, small.id).await.unwrap();
        assert!(delete_size(&pool, a.beverage.id, small.id).await.is_err());
    }

    #[tokio::test]
    async fn test_rename_size_onto_taken_label() {
        let pool = test_pool().await;
        let detail = create(
            &pool,
            lemonade("Classic Lemonade", vec![size("Small", 2.0), size("Medium", 3.0)]),
        )
        .await
        .unwrap();
        let medium = detail.sizes.iter().find(|s| s.size == "Medium").unwrap();

        let err = update_size(
            &pool,
            detail.beverage.id,
            medium.id,
            BeverageSizeUpdate {
                size: Some(" Small ".into()),
                price: Some(9.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ref m) if m == SIZE_EXISTS));

        // Rejected update leaves the row as it was
        let unchanged = find_size(&pool, detail.beverage.id, medium.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.size, "Medium");
        assert_eq!(unchanged.price, 3.0);
    }
}
