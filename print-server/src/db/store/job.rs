//! Notification job queue — durable deferred sends
//!
//! Jobs survive process restarts; the worker drains due rows on an
//! interval. Rows that exhaust their attempts stay parked with
//! `last_error` set for manual inspection.

use serde::{Deserialize, Serialize};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

/// Queued notification job row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotifyJob {
    pub id: i64,
    pub kind: String,
    pub payload: String,
    pub due_at: i64,
    pub attempts: i64,
    pub last_error: Option<String>,
    pub created_at: i64,
}

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    kind: &str,
    payload: &str,
    due_at: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO notify_jobs (kind, payload, due_at, attempts, created_at) \
         VALUES ($1, $2, $3, 0, $4)",
    )
    .bind(kind)
    .bind(payload)
    .bind(due_at)
    .bind(now_millis())
    .execute(ex)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Due jobs in FIFO order, excluding parked rows.
pub async fn fetch_due(
    ex: impl SqliteExecutor<'_>,
    now: i64,
    max_attempts: i64,
) -> Result<Vec<NotifyJob>, sqlx::Error> {
    sqlx::query_as::<_, NotifyJob>(
        "SELECT * FROM notify_jobs \
         WHERE due_at <= $1 AND attempts < $2 \
         ORDER BY id",
    )
    .bind(now)
    .bind(max_attempts)
    .fetch_all(ex)
    .await
}

/// Delete a job after successful execution.
pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM notify_jobs WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(())
}

/// Record a failed attempt and push the job to its next retry slot.
pub async fn mark_failed(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    error: &str,
    next_due: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE notify_jobs SET attempts = attempts + 1, last_error = $2, due_at = $3 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(error)
    .bind(next_due)
    .execute(ex)
    .await?;
    Ok(())
}

/// Jobs that exhausted their attempts (for inspection/tests).
pub async fn list_parked(
    ex: impl SqliteExecutor<'_>,
    max_attempts: i64,
) -> Result<Vec<NotifyJob>, sqlx::Error> {
    sqlx::query_as::<_, NotifyJob>("SELECT * FROM notify_jobs WHERE attempts >= $1 ORDER BY id")
        .bind(max_attempts)
        .fetch_all(ex)
        .await
}
