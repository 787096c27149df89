//! Rate tables
//!
//! Closed enums with exhaustive matches — an unknown combination cannot be
//! written, and the "unset means zero / default rate" rules live in one
//! place. All rates in ariary.

use rust_decimal::Decimal;
use shared::models::{BindingType, CoverPaper, DuplexMode, SmallFormat};

/// Flat delivery fee added to every priced order
pub const DELIVERY_FEE: i64 = 5_000;

/// Amount substituted when a price cannot be determined
pub const FALLBACK_AMOUNT: i64 = 10_000;

/// Large-format surface rate per square meter
pub const LARGE_FORMAT_RATE_PER_M2: i64 = 15_000;

/// Price per page for the book branch. A missing size prices at the
/// custom rate.
pub fn page_rate(format: Option<SmallFormat>) -> i64 {
    match format {
        Some(SmallFormat::A5) => 300,
        Some(SmallFormat::A4) => 500,
        Some(SmallFormat::A3) => 800,
        Some(SmallFormat::Custom) | None => 600,
    }
}

/// Price per cover; no cover paper selected means no cover.
pub fn cover_rate(cover: Option<CoverPaper>) -> i64 {
    match cover {
        Some(CoverPaper::Simple) => 1_000,
        Some(CoverPaper::Rigide) => 2_500,
        None => 0,
    }
}

/// Price per copy for the binding; unset means unbound.
pub fn binding_rate(binding: Option<BindingType>) -> i64 {
    match binding {
        Some(BindingType::Spirale) => 2_000,
        Some(BindingType::Agrafe) => 500,
        Some(BindingType::DosCarreColle) => 3_000,
        None => 0,
    }
}

/// Cover-cost multiplier for duplex printing
pub fn duplex_multiplier(duplex: Option<DuplexMode>) -> Decimal {
    match duplex {
        Some(DuplexMode::RectoVerso) => Decimal::new(15, 1), // 1.5
        Some(DuplexMode::Recto) | None => Decimal::ONE,
    }
}

/// Multiplier applied to a product's base price when the configured size
/// differs from the product's default size.
pub fn format_multiplier(
    configured: Option<SmallFormat>,
    product_default: Option<SmallFormat>,
) -> Decimal {
    if configured.is_some() && configured == product_default {
        return Decimal::ONE;
    }
    match configured {
        Some(SmallFormat::A3) => Decimal::new(15, 1),     // 1.5
        Some(SmallFormat::A4) => Decimal::new(12, 1),     // 1.2
        Some(SmallFormat::Custom) => Decimal::new(13, 1), // 1.3
        _ => Decimal::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_options_price_at_zero() {
        assert_eq!(cover_rate(None), 0);
        assert_eq!(binding_rate(None), 0);
        assert_eq!(duplex_multiplier(None), Decimal::ONE);
    }

    #[test]
    fn test_missing_size_uses_custom_page_rate() {
        assert_eq!(page_rate(None), page_rate(Some(SmallFormat::Custom)));
    }

    #[test]
    fn test_matching_default_format_is_neutral() {
        assert_eq!(
            format_multiplier(Some(SmallFormat::A3), Some(SmallFormat::A3)),
            Decimal::ONE
        );
    }

    #[test]
    fn test_mismatch_multipliers() {
        assert_eq!(
            format_multiplier(Some(SmallFormat::A3), Some(SmallFormat::A4)),
            Decimal::new(15, 1)
        );
        assert_eq!(
            format_multiplier(Some(SmallFormat::A4), Some(SmallFormat::A5)),
            Decimal::new(12, 1)
        );
        assert_eq!(
            format_multiplier(Some(SmallFormat::Custom), None),
            Decimal::new(13, 1)
        );
        // A5 and absent sizes fall back to neutral
        assert_eq!(
            format_multiplier(Some(SmallFormat::A5), Some(SmallFormat::A4)),
            Decimal::ONE
        );
        assert_eq!(format_multiplier(None, Some(SmallFormat::A4)), Decimal::ONE);
    }
}
