//! Notification Worker — processes the durable notify_jobs queue
//!
//! Deferred sends (the post-creation order confirmation) are rows in
//! `notify_jobs`, so they survive process restarts. The worker scans for
//! due rows on an interval, writes the in-app notification, sends the
//! best-effort email and deletes the row. Failures retry with exponential
//! backoff until the attempt budget runs out; exhausted rows stay parked
//! with `last_error` for inspection.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::db::store::job::{self, NotifyJob};
use crate::db::store::{notification, order, user};
use crate::error::BoxError;
use crate::services::mailer::{self, Mailer};

/// Worker configuration
pub const MAX_ATTEMPTS: i64 = 3;
const RETRY_BASE_DELAY_SECS: i64 = 5;
const RETRY_MAX_DELAY_SECS: i64 = 60;
const QUEUE_SCAN_INTERVAL_SECS: u64 = 30;

const KIND_ORDER_CONFIRMATION: &str = "order_confirmation";

/// Payload of an order-confirmation job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationJob {
    pub order_id: i64,
    pub user_id: i64,
}

/// Queue an order confirmation for delivery at `due_at`.
pub async fn enqueue_confirmation(
    pool: &SqlitePool,
    order_id: i64,
    user_id: i64,
    due_at: i64,
) -> Result<i64, BoxError> {
    let payload = serde_json::to_string(&ConfirmationJob { order_id, user_id })?;
    let id = job::insert(pool, KIND_ORDER_CONFIRMATION, &payload, due_at).await?;
    tracing::debug!(job_id = id, order_id, due_at, "Confirmation job enqueued");
    Ok(id)
}

/// Worker for the notify_jobs queue
pub struct NotifyWorker {
    pool: SqlitePool,
    mailer: Arc<dyn Mailer>,
}

impl NotifyWorker {
    pub fn new(pool: SqlitePool, mailer: Arc<dyn Mailer>) -> Self {
        Self { pool, mailer }
    }

    /// Run the worker loop. Processes anything left over from a previous
    /// run immediately, then scans on an interval.
    pub async fn run(self) {
        tracing::info!(
            scan_interval_secs = QUEUE_SCAN_INTERVAL_SECS,
            "NotifyWorker started"
        );
        let mut scan_interval =
            tokio::time::interval(Duration::from_secs(QUEUE_SCAN_INTERVAL_SECS));
        loop {
            scan_interval.tick().await;
            self.run_due_jobs().await;
        }
    }

    /// Single queue pass: execute every due job. Returns the number of
    /// jobs that completed.
    pub async fn run_due_jobs(&self) -> usize {
        let due = match job::fetch_due(&self.pool, now_millis(), MAX_ATTEMPTS).await {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch due notification jobs");
                return 0;
            }
        };

        let mut completed = 0;
        for entry in due {
            match self.execute(&entry).await {
                Ok(()) => {
                    if let Err(e) = job::delete(&self.pool, entry.id).await {
                        tracing::error!(job_id = entry.id, error = %e, "Failed to delete completed job");
                    } else {
                        completed += 1;
                    }
                }
                Err(e) => {
                    let next_due = now_millis() + backoff_delay_secs(entry.attempts) * 1000;
                    tracing::warn!(
                        job_id = entry.id,
                        attempts = entry.attempts + 1,
                        error = %e,
                        "Notification job failed, scheduling retry"
                    );
                    if let Err(e2) =
                        job::mark_failed(&self.pool, entry.id, &e.to_string(), next_due).await
                    {
                        tracing::error!(job_id = entry.id, error = %e2, "Failed to mark job failed");
                    }
                }
            }
        }
        completed
    }

    async fn execute(&self, entry: &NotifyJob) -> Result<(), BoxError> {
        match entry.kind.as_str() {
            KIND_ORDER_CONFIRMATION => {
                let payload: ConfirmationJob = serde_json::from_str(&entry.payload)?;
                self.send_confirmation(&payload).await
            }
            other => Err(format!("unknown job kind: {other}").into()),
        }
    }

    async fn send_confirmation(&self, payload: &ConfirmationJob) -> Result<(), BoxError> {
        // Order may be gone by the time the job fires; nothing to announce
        let Some(_) = order::get(&self.pool, payload.order_id)
            .await
            .map_err(|e| -> BoxError { e.into() })?
        else {
            tracing::info!(
                order_id = payload.order_id,
                "Order removed before confirmation fired, dropping job"
            );
            return Ok(());
        };

        let (subject, body) = mailer::order_confirmation(payload.order_id);
        notification::insert(&self.pool, None, payload.user_id, &subject)
            .await
            .map_err(|e| -> BoxError { e.into() })?;

        // Email is best-effort; the in-app notification already landed
        if let Some(owner) = user::get(&self.pool, payload.user_id)
            .await
            .map_err(|e| -> BoxError { e.into() })?
        {
            if let Err(e) = self.mailer.send_email(&owner.email, &subject, &body).await {
                tracing::warn!(
                    order_id = payload.order_id,
                    error = %e,
                    "Confirmation email failed; in-app notification delivered"
                );
            }
        }
        Ok(())
    }
}

/// Exponential backoff: delay = base * 2^attempts, capped at the max
fn backoff_delay_secs(attempts: i64) -> i64 {
    let exp = attempts.clamp(0, 16) as u32;
    (RETRY_BASE_DELAY_SECS * 2i64.pow(exp)).min(RETRY_MAX_DELAY_SECS)
}
