//! Order Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::file::PrintFile;
use super::payment::Payment;
use super::print_config::PrintConfiguration;
use crate::error::AppError;

/// Order status enum.
///
/// The six values are totally ordered for display purposes. Admins may set
/// any value directly; only membership in the enum is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    Pending,
    Received,
    Printing,
    Done,
    Shipping,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Received,
        OrderStatus::Printing,
        OrderStatus::Done,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Received => "RECEIVED",
            Self::Printing => "PRINTING",
            Self::Done => "DONE",
            Self::Shipping => "SHIPPING",
            Self::Delivered => "DELIVERED",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "RECEIVED" => Ok(Self::Received),
            "PRINTING" => Ok(Self::Printing),
            "DONE" => Ok(Self::Done),
            "SHIPPING" => Ok(Self::Shipping),
            "DELIVERED" => Ok(Self::Delivered),
            other => Err(AppError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: Option<i64>,
    pub user_id: i64,
    pub configuration_id: i64,
    pub status: OrderStatus,
    /// Cached total in ariary; the recomputed price is the truth
    pub total_amount: i64,
    pub payment_method: String,
    pub is_deleted: bool,
    pub created_at: i64,
}

/// Order with its owned records resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    pub configuration: PrintConfiguration,
    pub files: Vec<PrintFile>,
    pub payment: Option<Payment>,
}
