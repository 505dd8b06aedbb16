//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are exact decimals (`rust_decimal`), so cart subtotals like
//! `79.99 * 2 + 49.99` come out as `209.97` with no float drift.

use core::fmt;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// Create a USD price from a whole number of cents.
    ///
    /// ```
    /// use fabu_core::Price;
    ///
    /// assert_eq!(Price::from_cents(7999).to_string(), "$79.99");
    /// ```
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, 2), CurrencyCode::USD)
    }

    /// A zero amount in USD.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::USD)
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Multiply the unit price by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Format for display with two decimal places (e.g., `"$19.99"`).
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Price {
    type Output = Self;

    /// Adds two amounts. The catalog is single-currency, so the left-hand
    /// currency is kept.
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
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
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(22000).to_string(), "$220.00");
        assert_eq!(Price::from_cents(4999).to_string(), "$49.99");
        assert_eq!(Price::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_times_is_exact() {
        let blouse = Price::from_cents(7999);
        assert_eq!(blouse.times(2), Price::from_cents(15998));
        assert_eq!(blouse.times(0), Price::zero().times(1));
    }

    #[test]
    fn test_add() {
        let total = Price::from_cents(15998) + Price::from_cents(4999);
        assert_eq!(total.amount, Decimal::new(20997, 2));
    }

    #[test]
    fn test_is_negative() {
        assert!(!Price::zero().is_negative());
        assert!(!Price::from_cents(1).is_negative());
        assert!(Price::from_cents(-1).is_negative());
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(CurrencyCode::USD.symbol(), "$");
        assert_eq!(CurrencyCode::GBP.code(), "GBP");
    }
}
