//! Notification database operations

use shared::models::Notification;
use shared::util::now_millis;
use sqlx::SqliteExecutor;

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    sender_id: Option<i64>,
    recipient_id: i64,
    message: &str,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (sender_id, recipient_id, message, is_read, is_deleted, created_at) \
         VALUES ($1, $2, $3, 0, 0, $4) \
         RETURNING *",
    )
    .bind(sender_id)
    .bind(recipient_id)
    .bind(message)
    .bind(now_millis())
    .fetch_one(ex)
    .await
}

pub async fn get(
    ex: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// Notifications addressed to a user, newest first.
pub async fn list_inbox(
    ex: impl SqliteExecutor<'_>,
    recipient_id: i64,
    include_deleted: bool,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications \
         WHERE recipient_id = $1 AND ($2 OR is_deleted = 0) \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(recipient_id)
    .bind(include_deleted)
    .fetch_all(ex)
    .await
}

/// Every notification row (admin view), newest first.
pub async fn list_all(
    ex: impl SqliteExecutor<'_>,
    include_deleted: bool,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE $1 OR is_deleted = 0 \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(include_deleted)
    .fetch_all(ex)
    .await
}

/// Notifications a user authored. Self-addressed rows are suppressed so the
/// sent view does not echo the inbox.
pub async fn list_sent(
    ex: impl SqliteExecutor<'_>,
    sender_id: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications \
         WHERE sender_id = $1 AND recipient_id != $1 AND is_deleted = 0 \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(sender_id)
    .fetch_all(ex)
    .await
}

/// Flip every unread notification of a recipient to read. Returns the
/// number of rows changed.
pub async fn mark_all_read(
    ex: impl SqliteExecutor<'_>,
    recipient_id: i64,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE recipient_id = $1 AND is_read = 0")
            .bind(recipient_id)
            .execute(ex)
            .await?;
    Ok(result.rows_affected())
}

pub async fn unread_count(
    ex: impl SqliteExecutor<'_>,
    recipient_id: i64,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM notifications \
         WHERE recipient_id = $1 AND is_read = 0 AND is_deleted = 0",
    )
    .bind(recipient_id)
    .fetch_one(ex)
    .await?;
    Ok(count)
}

pub async fn set_deleted(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    deleted: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE notifications SET is_deleted = $2 WHERE id = $1")
        .bind(id)
        .bind(deleted)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}
