//! Notification Service
//!
//! Append-only directed messages between users and admins with read and
//! soft-delete state. Content is never edited. Recipients (or admins) own
//! the read/delete/restore operations; ownership failures surface as
//! `NotFound` so existence never leaks to unauthorized actors.

use shared::error::AppError;
use shared::models::{Actor, Notification};
use sqlx::SqlitePool;

use crate::db::store::{notification, user};
use crate::error::ServiceResult;
use crate::utils::validation::{MAX_MESSAGE_LEN, validate_required_text};

#[derive(Clone)]
pub struct NotificationService {
    pool: SqlitePool,
}

impl NotificationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Send a message from the actor to a recipient. Always creates a new
    /// row; there is no deduplication.
    pub async fn send(
        &self,
        actor: &Actor,
        recipient_id: i64,
        message: &str,
    ) -> ServiceResult<Notification> {
        validate_required_text(message, "message", MAX_MESSAGE_LEN)?;
        if user::get(&self.pool, recipient_id).await?.is_none() {
            return Err(AppError::validation(format!("unknown recipient {recipient_id}")).into());
        }

        let created =
            notification::insert(&self.pool, Some(actor.user_id), recipient_id, message).await?;
        tracing::debug!(
            notification_id = ?created.id,
            recipient_id,
            "Notification sent"
        );
        Ok(created)
    }

    /// Send a system message (no sender) to a recipient.
    pub async fn send_system(&self, recipient_id: i64, message: &str) -> ServiceResult<Notification> {
        validate_required_text(message, "message", MAX_MESSAGE_LEN)?;
        if user::get(&self.pool, recipient_id).await?.is_none() {
            return Err(AppError::validation(format!("unknown recipient {recipient_id}")).into());
        }
        Ok(notification::insert(&self.pool, None, recipient_id, message).await?)
    }

    /// The actor's inbox, newest first.
    pub async fn list_inbox(
        &self,
        actor: &Actor,
        include_deleted: bool,
    ) -> ServiceResult<Vec<Notification>> {
        Ok(notification::list_inbox(&self.pool, actor.user_id, include_deleted).await?)
    }

    /// Every notification row — admin only.
    pub async fn list_all(
        &self,
        actor: &Actor,
        include_deleted: bool,
    ) -> ServiceResult<Vec<Notification>> {
        if !actor.is_admin() {
            return Err(AppError::forbidden("listing all notifications requires an admin").into());
        }
        Ok(notification::list_all(&self.pool, include_deleted).await?)
    }

    /// Messages the actor authored, excluding any addressed back to
    /// themselves.
    pub async fn list_sent_by(&self, actor: &Actor) -> ServiceResult<Vec<Notification>> {
        Ok(notification::list_sent(&self.pool, actor.user_id).await?)
    }

    /// Bulk-flip unread to read for the actor's inbox. Returns the number
    /// of rows flipped.
    pub async fn mark_all_read(&self, actor: &Actor) -> ServiceResult<u64> {
        Ok(notification::mark_all_read(&self.pool, actor.user_id).await?)
    }

    pub async fn unread_count(&self, actor: &Actor) -> ServiceResult<i64> {
        Ok(notification::unread_count(&self.pool, actor.user_id).await?)
    }

    pub async fn soft_delete(&self, actor: &Actor, id: i64) -> ServiceResult<()> {
        let target = self.owned(actor, id).await?;
        notification::set_deleted(&self.pool, target.id.unwrap_or_default(), true).await?;
        Ok(())
    }

    pub async fn restore(&self, actor: &Actor, id: i64) -> ServiceResult<()> {
        let target = self.owned(actor, id).await?;
        notification::set_deleted(&self.pool, target.id.unwrap_or_default(), false).await?;
        Ok(())
    }

    pub async fn hard_delete(&self, actor: &Actor, id: i64) -> ServiceResult<()> {
        let target = self.owned(actor, id).await?;
        notification::delete(&self.pool, target.id.unwrap_or_default()).await?;
        Ok(())
    }

    /// Fetch a notification the actor may act on: the recipient or an
    /// admin. Anything else reads as not found.
    async fn owned(&self, actor: &Actor, id: i64) -> ServiceResult<Notification> {
        let found = notification::get(&self.pool, id).await?;
        match found {
            Some(n) if actor.is_admin() || n.recipient_id == actor.user_id => Ok(n),
            _ => Err(AppError::not_found(format!("notification {id} not found")).into()),
        }
    }
}
