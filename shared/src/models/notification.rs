//! Notification Model

use serde::{Deserialize, Serialize};

/// Directed message between users/admins.
///
/// `sender_id` of `None` means the system (order confirmations, lifecycle
/// updates). Content is never edited; only the read and soft-delete flags
/// change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: Option<i64>,
    pub sender_id: Option<i64>,
    pub recipient_id: i64,
    pub message: String,
    pub is_read: bool,
    pub is_deleted: bool,
    pub created_at: i64,
}
