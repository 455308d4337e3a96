//! # Money Module
//!
//! Provides the `Money` type: an amount in minor currency units (cents).
//!
//! ## Where Floats Are Allowed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Integer in, integer out                                               │
//! │                                                                         │
//! │  landed cost ──► effective cost ──► ... ──► final price                │
//! │   (Money)          (Money)                    (Money)                   │
//! │                                                                         │
//! │  In between, profit targets and the net rate are ratios and may be     │
//! │  fractional (0.8 × 2054 = 1643.2). Every value that leaves the engine  │
//! │  as money goes through `Money::round_half_up` first.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::money::Money;
//! use pricing_core::types::Rate;
//!
//! let cost = Money::from_cents(680);
//! let safety_net = cost.apply_rate(Rate::from_bps(800)); // 8% of 680 = 54.4
//! assert_eq!(safety_net.cents(), 54);
//!
//! assert_eq!(Money::round_half_up(1828.447).cents(), 1828);
//! assert_eq!(Money::round_half_up(4046.5).cents(), 4047);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// The currency itself is not part of the value; see [`crate::types::Price`]
/// for an amount tagged with its currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a float, for ratio arithmetic.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Rounds a fractional minor-unit amount to the nearest unit, halves up.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    ///
    /// assert_eq!(Money::round_half_up(53.6).cents(), 54);
    /// assert_eq!(Money::round_half_up(1643.2).cents(), 1643);
    /// assert_eq!(Money::round_half_up(0.5).cents(), 1);
    /// ```
    #[inline]
    pub fn round_half_up(amount: f64) -> Self {
        Money((amount + 0.5).floor() as i64)
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Applies a rate to this amount, rounding half up to a whole unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 is the half.
    /// i128 keeps large amounts from overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    /// use pricing_core::types::Rate;
    ///
    /// let fee = Money::from_cents(1000).apply_rate(Rate::from_bps(290));
    /// assert_eq!(fee.cents(), 29);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Adds, saturating at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts, saturating at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as major.minor without a currency symbol.
///
/// Formatting for shoppers belongs to the storefront, which knows the
/// currency and locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
