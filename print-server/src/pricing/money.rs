//! Money conversion helpers
//!
//! Amounts are whole ariary (`i64`) at rest; calculations happen in
//! `Decimal` and round half-up on the way out.

use rust_decimal::prelude::*;

/// Convert a stored amount to Decimal for calculation
#[inline]
pub fn to_decimal(amount: i64) -> Decimal {
    Decimal::from(amount)
}

/// Convert a physical dimension (cm) to Decimal
#[inline]
pub fn dim_to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite dimension in price calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round a computed total to whole ariary (half-up)
#[inline]
pub fn to_ariary(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
