//! Price Calculator
//!
//! Two disjoint branches selected by the book flag:
//!
//! - Book: pages x page-rate + cover x duplex + binding, per copy, plus the
//!   delivery fee.
//! - Standard product: base price x format multiplier x quantity plus the
//!   delivery fee. Requires a resolved product; a large-format
//!   configuration without one falls back to the legacy surface pricing.
//!
//! `quote` reports why a price could not be determined; only
//! [`price_or_fallback`] coerces that into the fallback constant, so the
//! degradation policy stays visible at the order-creation boundary.

use rust_decimal::Decimal;
use shared::models::{FormatClass, PrintConfiguration, Product};

use super::money::{dim_to_decimal, to_ariary, to_decimal};
use super::rates;

/// Why a configuration could not be priced exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PricingDegraded {
    #[error("quantity is not positive")]
    InvalidQuantity,
    #[error("book configuration without a positive page count")]
    MissingPages,
    #[error("standard configuration without a resolved product")]
    MissingProduct,
}

/// Exact price for a configuration, in ariary.
pub fn quote(cfg: &PrintConfiguration, product: Option<&Product>) -> Result<i64, PricingDegraded> {
    if cfg.quantity <= 0 {
        return Err(PricingDegraded::InvalidQuantity);
    }
    let quantity = Decimal::from(cfg.quantity);

    if cfg.is_book {
        let pages = match cfg.book_pages {
            Some(p) if p > 0 => Decimal::from(p),
            _ => return Err(PricingDegraded::MissingPages),
        };

        let page_cost = to_decimal(rates::page_rate(cfg.small_format)) * pages * quantity;
        let cover_cost = to_decimal(rates::cover_rate(cfg.cover_paper))
            * rates::duplex_multiplier(cfg.duplex)
            * quantity;
        let binding_cost = to_decimal(rates::binding_rate(cfg.binding)) * quantity;

        let total = page_cost + cover_cost + binding_cost + to_decimal(rates::DELIVERY_FEE);
        return Ok(to_ariary(total));
    }

    match product {
        Some(product) => {
            let multiplier = rates::format_multiplier(cfg.small_format, product.default_format);
            let total = to_decimal(product.base_price) * multiplier * quantity
                + to_decimal(rates::DELIVERY_FEE);
            Ok(to_ariary(total))
        }
        None => {
            // Orphaned configurations (product removed after the fact) can
            // still be priced by surface when the dimensions are known.
            if cfg.format_class == FormatClass::Grand
                && let (Some(width), Some(height)) = (cfg.width_cm, cfg.height_cm)
            {
                Ok(surface_price(width, height, cfg.quantity))
            } else {
                Err(PricingDegraded::MissingProduct)
            }
        }
    }
}

/// Legacy surface-based pricing for large-format jobs: square meters,
/// floored at 1 m², times the surface rate, times quantity.
pub fn surface_price(width_cm: f64, height_cm: f64, quantity: i64) -> i64 {
    let hundred = Decimal::ONE_HUNDRED;
    let surface = (dim_to_decimal(width_cm) / hundred) * (dim_to_decimal(height_cm) / hundred);
    let surface = surface.max(Decimal::ONE);
    to_ariary(surface * to_decimal(rates::LARGE_FORMAT_RATE_PER_M2) * Decimal::from(quantity))
}

/// Total for order creation: degraded configurations price at the fallback
/// constant rather than blocking the order.
pub fn price_or_fallback(cfg: &PrintConfiguration, product: Option<&Product>) -> i64 {
    match quote(cfg, product) {
        Ok(total) => total.max(0),
        Err(reason) => {
            tracing::warn!(%reason, "Pricing degraded, using fallback amount");
            rates::FALLBACK_AMOUNT
        }
    }
}
