//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
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

    /// Create a price from whole currency units.
    #[must_use]
    pub fn whole(units: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(units, 0), currency_code)
    }

    /// Format for display (e.g., "$19").
    ///
    /// Whole amounts drop the fractional part; others keep two decimals.
    #[must_use]
    pub fn display(&self) -> String {
        if self.amount.fract().is_zero() {
            format!("{}{}", self.currency_code.symbol(), self.amount.trunc())
        } else {
            format!("{}{:.2}", self.currency_code.symbol(), self.amount)
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole() {
        assert_eq!(Price::whole(19, CurrencyCode::USD).display(), "$19");
        assert_eq!(Price::whole(0, CurrencyCode::USD).display(), "$0");
    }

    #[test]
    fn test_display_fractional() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::EUR);
        assert_eq!(price.display(), "€19.99");
    }
}
