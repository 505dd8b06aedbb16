//! Checkout snapshots and order numbers.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, Totals, compute_totals};

/// Prefix for generated order numbers.
pub const ORDER_PREFIX: &str = "ORD-";

/// Number of trailing epoch-millisecond digits kept in an order number.
const ORDER_DIGITS: u32 = 8;

/// An order number derived from a clock reading.
///
/// Not unique: two checkouts in the same millisecond (or 10^8 ms apart) get
/// the same number. There is no order system behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// `ORD-` followed by the last eight digits of `now` in epoch
    /// milliseconds, zero-padded.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use fabu_core::OrderNumber;
    ///
    /// let now = Utc.timestamp_millis_opt(1_749_719_181_234).unwrap();
    /// assert_eq!(OrderNumber::from_clock(now).as_str(), "ORD-19181234");
    /// ```
    #[must_use]
    pub fn from_clock(now: DateTime<Utc>) -> Self {
        let modulus = 10_i64.pow(ORDER_DIGITS);
        let digits = now.timestamp_millis().rem_euclid(modulus);
        Self(format!("{ORDER_PREFIX}{digits:0width$}", width = ORDER_DIGITS as usize))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The cart as it was when the visitor checked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSnapshot {
    pub order_number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    items: Vec<CartItem>,
}

impl CheckoutSnapshot {
    /// Snapshot `items` at `now`.
    #[must_use]
    pub fn new(items: Vec<CartItem>, now: DateTime<Utc>) -> Self {
        Self {
            order_number: OrderNumber::from_clock(now),
            placed_at: now,
            items,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items)
    }

    /// Sum of quantities in the order.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Receipt timestamp, e.g. `6/12/2025, 9:06:21 AM`.
    #[must_use]
    pub fn placed_at_display(&self) -> String {
        self.placed_at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }
}
