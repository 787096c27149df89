//! Pricing Engine
//!
//! Pure, deterministic mapping from a print configuration (plus an optional
//! catalog product) to a total in ariary. No I/O: callers resolve the
//! product reference first.
//!
//! All arithmetic runs in `rust_decimal::Decimal`; the result is rounded
//! half-up to whole ariary only when it leaves the calculator.

pub mod calculator;
pub mod money;
pub mod rates;

pub use calculator::{PricingDegraded, price_or_fallback, quote, surface_price};
pub use rates::{DELIVERY_FEE, FALLBACK_AMOUNT};
