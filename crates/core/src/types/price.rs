//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are carried as [`Decimal`] end to end so cart totals, shipping and
//! order totals never pick up floating-point drift.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest amount a `NUMERIC(10,2)` money column holds: `99999999.99`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (taka, not poisha).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the shop's default currency.
    #[must_use]
    pub const fn taka(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::BDT)
    }

    /// Format for display, e.g. `৳1500.00`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), format_amount(self.amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BDT,
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BDT => "৳",
            Self::USD => "$",
        }
    }
}

/// Render an amount as a fixed-point string with exactly two decimal places.
///
/// Rounds half away from zero, matching how totals are shown to customers.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_amount_matches_column() {
        assert_eq!(MAX_AMOUNT, Decimal::new(9_999_999_999, 2));
        assert_eq!(format_amount(MAX_AMOUNT), "99999999.99");
    }

    #[test]
    fn test_format_amount_pads_to_two_places() {
        assert_eq!(format_amount(Decimal::new(1500, 0)), "1500.00");
        assert_eq!(format_amount(Decimal::new(15, 1)), "1.50");
    }

    #[test]
    fn test_format_amount_rounds() {
        assert_eq!(format_amount(Decimal::new(12_345, 3)), "12.35");
        assert_eq!(format_amount(Decimal::new(12_344, 3)), "12.34");
    }

    #[test]
    fn test_price_display_uses_symbol() {
        let price = Price::taka(Decimal::new(68_000, 2));
        assert_eq!(price.display(), "৳680.00");
        assert_eq!(price.to_string(), "৳680.00");
    }
}
