//! File Model
//!
//! Metadata only — the bytes live with the file-storage collaborator, the
//! core keeps the opaque handle it hands back.

use serde::{Deserialize, Serialize};

/// Uploaded file record, owned by exactly one order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PrintFile {
    pub id: Option<i64>,
    pub order_id: i64,
    pub file_name: String,
    /// Opaque storage handle
    pub handle: String,
    /// Declared format label (e.g. "pdf")
    pub format: String,
    pub size_kb: f64,
    pub resolution_dpi: i64,
    pub color_profile: String,
    pub created_at: i64,
}

/// File payload attached to a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInput {
    pub file_name: String,
    pub handle: String,
    pub format: String,
    pub size_kb: f64,
    pub resolution_dpi: i64,
    pub color_profile: String,
}
