//! Payment Model
//!
//! One record per order, created in `PENDING` when the order is created.
//! Only the payment-gateway collaborator moves it afterwards.

use serde::{Deserialize, Serialize};

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

/// Payment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: Option<i64>,
    pub order_id: i64,
    /// Mobile-money phone contact
    pub phone: String,
    /// Must equal the order total
    pub amount: i64,
    /// External transaction reference
    pub transaction_ref: Option<String>,
    pub status: PaymentStatus,
    pub created_at: i64,
}
