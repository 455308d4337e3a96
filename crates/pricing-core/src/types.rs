//! # Domain Types
//!
//! Shared types used throughout the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Rate       │   │      Price      │   │     Variant     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  amount (Money) │   │  landed_cost    │       │
//! │  │  290 = 2.9%     │   │  currency       │   │  strategy, tone │       │
//! │  └─────────────────┘   └─────────────────┘   │  qty_soh        │       │
//! │                                              │  default_price  │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::strategy::PricingStrategy;
use crate::tone::Tone;

// =============================================================================
// Rate
// =============================================================================

/// A ratio represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. Fee rates, discount assumptions, strategy
/// markups and tone multipliers are all stored this way so the constants are
/// exact integers; 290 bps = 2.9%, 11000 bps = ×1.10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// 10000 bps, i.e. 100% or ×1.00.
    pub const ONE: Rate = Rate(10_000);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (290 bps → 0.029).
    #[inline]
    pub fn as_fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Scales a fractional amount by this rate.
    ///
    /// Multiplies before dividing so whole-bps rates stay exact where the
    /// product is representable (600 × 11000 / 10000 = 660, not 660.0000001).
    #[inline]
    pub fn of(&self, amount: f64) -> f64 {
        amount * self.0 as f64 / 10_000.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Price
// =============================================================================

/// An amount tagged with the ISO 4217 code it is denominated in.
///
/// The engine never converts between currencies; a recomputed price keeps the
/// currency of the price it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: Money,
    pub currency: String,
}

impl Price {
    /// Creates a price.
    pub fn new(amount: Money, currency: impl Into<String>) -> Self {
        Price {
            amount,
            currency: currency.into(),
        }
    }

    /// Returns a price with a new amount in the same currency.
    pub fn with_amount(&self, amount: Money) -> Self {
        Price {
            amount,
            currency: self.currency.clone(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

// =============================================================================
// Variant
// =============================================================================

/// The product variant being priced.
///
/// Field names on the wire follow the storefront's variant record
/// (`landedCost`, `pricingStrategy`, `tone`, `qty_soh`, `defaultPrice`).
/// An absent or unrecognised strategy or tone deserializes to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Variant identifier (UUID v4).
    pub id: String,

    /// All-in cost of one unit in minor units.
    pub landed_cost: Money,

    #[serde(default)]
    pub pricing_strategy: PricingStrategy,

    #[serde(default)]
    pub tone: Tone,

    /// Stock on hand.
    #[serde(rename = "qty_soh", default)]
    pub qty_soh: i64,

    /// The stored list price. Derived; never an input to pricing.
    pub default_price: Price,
}

impl Variant {
    /// Creates a variant with default strategy and tone and a zero price.
    pub fn new(id: impl Into<String>, landed_cost: Money, currency: impl Into<String>) -> Self {
        Variant {
            id: id.into(),
            landed_cost,
            pricing_strategy: PricingStrategy::default(),
            tone: Tone::default(),
            qty_soh: 0,
            default_price: Price::new(Money::zero(), currency),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
