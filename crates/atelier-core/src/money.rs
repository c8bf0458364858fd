//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    Math.floor(999 * 0.1)  works by luck of the representation          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Won                                              │
//! │    Every amount is a whole number of won (KRW has no minor unit).       │
//! │    VAT is computed with integer basis points and floor division:       │
//! │      999 won × 1000 bps / 10000 = 99.9 → 99 won                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use atelier_core::money::Money;
//! use atelier_core::types::TaxRate;
//!
//! let unit_price = Money::from_won(1000);
//! let amount = unit_price.multiply_quantity(3);
//! assert_eq!(amount.won(), 3000);
//!
//! let tax = Money::from_won(999).tax_floor(TaxRate::VAT);
//! assert_eq!(tax.won(), 99);
//! assert_eq!(Money::from_won(1_234_567).to_string(), "1,234,567원");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::format::group_thousands;
use crate::types::TaxRate;
use crate::CURRENCY_SUFFIX;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole won.
///
/// ## Design Decisions
/// - **i64 (signed)**: the builder performs no validation, so a negative
///   quantity must still produce a well-defined (negative) amount
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Newtype**: serde writes a newtype as its inner number, exactly what
///   the admin UI stores for `unitPrice`
/// - **Saturating**: `+`, `-`, `*` and sums clamp at `i64::MIN`/`i64::MAX`
///   instead of panicking, so building a document never fails on its amounts
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  WorkStatusRecord.unit_price ──► DocumentItem.unit_price                │
/// │                                          │ × work_quantity              │
/// │                                          ▼                              │
/// │                                  DocumentItem.amount                    │
/// │                                          │ Σ                            │
/// │                                          ▼                              │
/// │  total_amount ──► tax_floor(10%) ──► tax ──► final_amount               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in whole won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, clamping on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Money;
    ///
    /// let line = Money::from_won(500).multiply_quantity(2);
    /// assert_eq!(line.won(), 1000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Calculates tax with truncating floor division.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  FLOOR, not round, not bankers rounding                             │
    /// │                                                                     │
    /// │    4000 won × 10% = 400.0 → 400                                     │
    /// │     999 won × 10% =  99.9 →  99                                     │
    /// │      19 won × 10% =   1.9 →   1                                     │
    /// │     -15 won × 10% =  -1.5 →  -2   (floor, toward negative infinity) │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// `(amount * bps).div_euclid(10000)` in i128, which is exact floor for
    /// a positive divisor and cannot overflow for any i64 amount.
    pub fn tax_floor(&self, rate: TaxRate) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money::from_won(scaled.div_euclid(10_000) as i64)
    }

    /// Formats the amount with thousands separators and no suffix.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Money;
    ///
    /// assert_eq!(Money::from_won(4400).grouped(), "4,400");
    /// assert_eq!(Money::from_won(-1098).grouped(), "-1,098");
    /// ```
    pub fn grouped(&self) -> String {
        group_thousands(self.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount the way every document prints it: `1,234원`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.grouped(), CURRENCY_SUFFIX)
    }
}

impl From<i64> for Money {
    fn from(won: i64) -> Self {
        Money(won)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_won() {
        let money = Money::from_won(1099);
        assert_eq!(money.won(), 1099);
        assert!(!money.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_won(0).to_string(), "0원");
        assert_eq!(Money::from_won(999).to_string(), "999원");
        assert_eq!(Money::from_won(1000).to_string(), "1,000원");
        assert_eq!(Money::from_won(1_234_567).to_string(), "1,234,567원");
        assert_eq!(Money::from_won(-4400).to_string(), "-4,400원");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_won(1000);
        let b = Money::from_won(500);

        assert_eq!((a + b).won(), 1500);
        assert_eq!((a - b).won(), 500);
        assert_eq!((a * 3).won(), 3000);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_won(3000), Money::from_won(1000)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.won(), 4000);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_overflow_saturates() {
        let price = Money::from_won(4_000_000_000_000_000_000);
        assert_eq!(price.multiply_quantity(3).won(), i64::MAX);
        assert_eq!((price * -3).won(), i64::MIN);

        let mut total = Money::from_won(i64::MAX);
        total += Money::from_won(1);
        assert_eq!(total.won(), i64::MAX);
        assert_eq!((Money::from_won(i64::MIN) - Money::from_won(1)).won(), i64::MIN);

        let sum: Money = [Money::from_won(i64::MAX), Money::from_won(i64::MAX)]
            .iter()
            .sum();
        assert_eq!(sum.won(), i64::MAX);
    }

    #[test]
    fn test_tax_floor_exact() {
        assert_eq!(Money::from_won(4000).tax_floor(TaxRate::VAT).won(), 400);
    }

    #[test]
    fn test_tax_floor_truncates() {
        // 99.9 must become 99, never 100
        assert_eq!(Money::from_won(999).tax_floor(TaxRate::VAT).won(), 99);
        assert_eq!(Money::from_won(19).tax_floor(TaxRate::VAT).won(), 1);
        assert_eq!(Money::from_won(9).tax_floor(TaxRate::VAT).won(), 0);
    }

    #[test]
    fn test_tax_floor_negative_rounds_down() {
        assert_eq!(Money::from_won(-15).tax_floor(TaxRate::VAT).won(), -2);
    }

    #[test]
    fn test_tax_floor_large_amount_no_overflow() {
        let huge = Money::from_won(i64::MAX / 2);
        let tax = huge.tax_floor(TaxRate::VAT);
        assert_eq!(tax.won(), (i64::MAX / 2) / 10);
    }

    #[test]
    fn test_serde_plain_number() {
        let json = serde_json::to_string(&Money::from_won(4400)).unwrap();
        assert_eq!(json, "4400");
        let back: Money = serde_json::from_str("999").unwrap();
        assert_eq!(back.won(), 999);
    }
}
