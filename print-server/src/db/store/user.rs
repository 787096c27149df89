//! User database operations

use shared::models::{User, UserCreate};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

pub async fn insert(ex: impl SqliteExecutor<'_>, data: &UserCreate) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, phone, role, created_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, name, email, phone, role, created_at",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(data.role)
    .bind(now_millis())
    .fetch_one(ex)
    .await
}

pub async fn get(ex: impl SqliteExecutor<'_>, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}
