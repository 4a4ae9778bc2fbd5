//! Money type for prices and cart totals.
//!
//! The catalog API reports prices as JSON decimals in US dollars. They are
//! converted to cents before any arithmetic so that discounts and subtotals
//! round once, the same way for every product.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// A dollar amount stored as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Round a decimal dollar amount to the nearest cent.
    ///
    /// ```
    /// use shop_commerce::Money;
    /// assert_eq!(Money::from_decimal(49.99).cents(), 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::from_cents((amount * 100.0).round() as i64)
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Format as `$49.99`.
    pub fn display(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}${}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Price after taking `percent` off, rounded to the nearest cent.
    ///
    /// Percentages outside 0-100 are clamped.
    pub fn discounted(&self, percent: f64) -> Money {
        let factor = 1.0 - percent.clamp(0.0, 100.0) / 100.0;
        Money::from_cents((self.cents as f64 * factor).round() as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.cents.saturating_add(other.cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money::from_cents(self.cents.saturating_mul(i64::from(quantity)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(49.99).cents(), 4999);
        assert_eq!(Money::from_decimal(0.005).cents(), 1);
        assert_eq!(Money::from_decimal(1549.0).cents(), 154_900);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4999).display(), "$49.99");
        assert_eq!(Money::from_cents(5).display(), "$0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
        assert_eq!(Money::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_discounted() {
        let price = Money::from_decimal(9.99);
        assert_eq!(price.discounted(7.17).cents(), 927);
        assert_eq!(price.discounted(0.0), price);
        assert!(price.discounted(150.0).is_zero());
    }

    #[test]
    fn test_multiply_and_sum() {
        let a = Money::from_cents(1000) * 2;
        let b = Money::from_cents(250);
        let total: Money = [a, b].into_iter().sum();
        assert_eq!(total.cents(), 2250);
        assert_eq!(Money::from_cents(i64::MAX) * 2, Money::from_cents(i64::MAX));
    }
}
