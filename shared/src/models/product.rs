//! Product Model

use serde::{Deserialize, Serialize};

use super::print_config::SmallFormat;

/// Catalog product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Base unit price in ariary
    pub base_price: i64,
    /// The sheet format the base price assumes
    pub default_format: Option<SmallFormat>,
    pub is_large_format: bool,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create product payload (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub base_price: i64,
    pub default_format: Option<SmallFormat>,
    #[serde(default)]
    pub is_large_format: bool,
}

/// Update product payload (admin only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<i64>,
    pub default_format: Option<SmallFormat>,
    pub is_large_format: Option<bool>,
    pub is_active: Option<bool>,
}
