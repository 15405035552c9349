//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus
//! the [`TaxRate`] used for GST computation.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In the browser front-end this engine replaces:                         │
//! │    subtotal * 0.18 = 341.99999999999994  ❌ WRONG!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    (190_000 * 1800 + 5000) / 10000 = 34_200 paise (₹342.00)            │
//! │    Rounding happens once, explicitly, at a known digit                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use boutique_core::money::Money;
//!
//! // Create from paise (the only constructor - no floats!)
//! let price = Money::from_paise(1099); // ₹10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // ₹21.98
//! let total = price + Money::from_paise(500);    // ₹15.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Newtype serde**: Serializes as a bare integer, which is exactly
///   the numeric field the `PUT /billing` body expects for `lineTotal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the rupee (major unit) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise (minor unit) portion, always 0-99.
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Applies an integer percentage discount and returns the net amount.
    ///
    /// ## Rounding
    /// Integer math with half-up rounding at the paise digit:
    /// `(amount * (100 - pct) + 50) / 100`. Callers must have validated
    /// `pct <= 99` already; the discount map never stores anything else.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::money::Money;
    ///
    /// let unit = Money::from_paise(500);
    /// assert_eq!(unit.apply_discount_percent(10).paise(), 450);
    /// assert_eq!(unit.apply_discount_percent(0).paise(), 500);
    /// ```
    pub fn apply_discount_percent(&self, pct: u8) -> Money {
        // i128 intermediate to keep large carts far away from overflow
        let net = (self.0 as i128 * (100 - pct as i128) + 50) / 100;
        Money(net as i64)
    }

    /// Calculates tax for this amount at the given rate.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::money::{Money, TaxRate};
    ///
    /// let subtotal = Money::from_paise(1900);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1800)); // 18%
    /// assert_eq!(tax.paise(), 342);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(tax as i64)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// Used on the text receipt; amounts render as `₹19.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over cart lines: `lines.map(net).sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (GST on apparel above the threshold)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 650].into_iter().map(Money::from_paise).sum();
        assert_eq!(total.paise(), 1000);
    }

    #[test]
    fn test_discount_basic() {
        // ₹5.00 at 10% off = ₹4.50
        let unit = Money::from_paise(500);
        assert_eq!(unit.apply_discount_percent(10).paise(), 450);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // 999 at 25% off = 749.25 → 749
        assert_eq!(Money::from_paise(999).apply_discount_percent(25).paise(), 749);
        // 998 at 25% off = 748.5 → 749 (half rounds up)
        assert_eq!(Money::from_paise(998).apply_discount_percent(25).paise(), 749);
    }

    #[test]
    fn test_discount_bounds() {
        let unit = Money::from_paise(500);
        assert_eq!(unit.apply_discount_percent(0).paise(), 500);
        assert_eq!(unit.apply_discount_percent(99).paise(), 5);
    }

    #[test]
    fn test_tax_at_18_percent() {
        // Subtotal 1900 at 18% = 342, exactly
        let subtotal = Money::from_paise(1900);
        let tax = subtotal.calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.paise(), 342);
    }

    #[test]
    fn test_tax_rounding() {
        // 1001 at 18% = 180.18 → 180
        let tax = Money::from_paise(1001).calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.paise(), 180);
    }

    #[test]
    fn test_tax_rate_default_is_configured_constant() {
        assert_eq!(TaxRate::default().bps(), crate::DEFAULT_TAX_RATE_BPS);
        assert!((TaxRate::default().percentage() - 18.0).abs() < 0.001);
    }
}
