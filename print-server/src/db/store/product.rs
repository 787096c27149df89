//! Product database operations

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    data: &ProductCreate,
) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, base_price, default_format, is_large_format, is_active, created_at) \
         VALUES ($1, $2, $3, $4, $5, 1, $6) \
         RETURNING *",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.base_price)
    .bind(data.default_format)
    .bind(data.is_large_format)
    .bind(now_millis())
    .fetch_one(ex)
    .await
}

/// Partial update; absent fields keep their current value.
pub async fn update(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    data: &ProductUpdate,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "UPDATE products SET \
            name            = COALESCE($2, name), \
            description     = COALESCE($3, description), \
            base_price      = COALESCE($4, base_price), \
            default_format  = COALESCE($5, default_format), \
            is_large_format = COALESCE($6, is_large_format), \
            is_active       = COALESCE($7, is_active) \
         WHERE id = $1 \
         RETURNING *",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.base_price)
    .bind(data.default_format)
    .bind(data.is_large_format)
    .bind(data.is_active)
    .fetch_optional(ex)
    .await
}

pub async fn get(ex: impl SqliteExecutor<'_>, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn list_active(ex: impl SqliteExecutor<'_>) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE is_active = 1 ORDER BY name")
        .fetch_all(ex)
        .await
}

/// Hard delete. Configurations that reference the product keep a NULL
/// reference afterwards (ON DELETE SET NULL).
pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}
