//! # Engine Constants
//!
//! Every business assumption the pricing pipeline relies on, in one
//! immutable value handed to [`crate::engine::PricingEngine::new`].
//!
//! ## Standard Assumptions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Refunds      refund_rate 8% of (return shipping 600                   │
//! │               + restock 30 + handling 50)                              │
//! │                                                                         │
//! │  Fees         processing 2.9% + 30 fixed, expected discount 5%,        │
//! │               tax 0% (placeholder)                                     │
//! │                                                                         │
//! │  Floors       volume cushion 100, inventory floor 50                   │
//! │                                                                         │
//! │  Strategies   volume 7.5%, unit-profit 600, revenue 500,               │
//! │               inventory 2.5%, premium 80%, risk-averse 30%             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tests and the config loader may build other sets; the engine validates
//! whatever it is given.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Rate;

// =============================================================================
// Strategy Coefficients
// =============================================================================

/// Per-strategy profit targets.
///
/// Percent-based strategies scale the effective cost; flat strategies use a
/// fixed amount regardless of cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyCoefficients {
    /// Share of effective cost targeted by `volume` (750 bps = 7.5%).
    pub volume_margin: Rate,

    /// Flat target for `unit-profit`.
    pub unit_profit_epu: Money,

    /// Flat target for `revenue`.
    pub revenue_epu: Money,

    /// Share of effective cost targeted by `inventory` (250 bps = 2.5%).
    pub inventory_margin: Rate,

    /// Markup on effective cost for `premium` (8000 bps = 80%).
    pub premium_markup: Rate,

    /// Markup on effective cost for `risk-averse` (3000 bps = 30%).
    pub risk_averse_markup: Rate,
}

impl StrategyCoefficients {
    pub const STANDARD: StrategyCoefficients = StrategyCoefficients {
        volume_margin: Rate::from_bps(750),
        unit_profit_epu: Money::from_cents(600),
        revenue_epu: Money::from_cents(500),
        inventory_margin: Rate::from_bps(250),
        premium_markup: Rate::from_bps(8000),
        risk_averse_markup: Rate::from_bps(3000),
    };
}

impl Default for StrategyCoefficients {
    fn default() -> Self {
        Self::STANDARD
    }
}

// =============================================================================
// Engine Constants
// =============================================================================

/// The full set of pricing assumptions.
///
/// Deserializes with per-field defaults, so a config file only needs the
/// values it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConstants {
    /// Share of sales expected to come back as refunds.
    pub refund_rate: Rate,

    /// Cost of the return label on a refunded unit.
    pub return_shipping_cost: Money,

    /// Cost of putting a returned unit back on the shelf.
    pub restock_cost: Money,

    /// Per-unit handling cost of a return.
    pub handling_cost: Money,

    /// Payment processor's percentage fee.
    pub processing_fee_rate: Rate,

    /// Payment processor's flat per-transaction fee.
    pub fixed_processing_fee: Money,

    /// Average promotional discount expected off the list price.
    pub expected_discount_rate: Rate,

    /// Always zero; tax is out of scope for list pricing.
    pub tax_rate: Rate,

    /// Minimum profit target for the `volume` strategy.
    pub cushion_min: Money,

    /// Minimum profit target for the `inventory` strategy.
    pub floor_epu: Money,

    pub strategy: StrategyCoefficients,
}

impl EngineConstants {
    pub const STANDARD: EngineConstants = EngineConstants {
        refund_rate: Rate::from_bps(800),
        return_shipping_cost: Money::from_cents(600),
        restock_cost: Money::from_cents(30),
        handling_cost: Money::from_cents(50),
        processing_fee_rate: Rate::from_bps(290),
        fixed_processing_fee: Money::from_cents(30),
        expected_discount_rate: Rate::from_bps(500),
        tax_rate: Rate::zero(),
        cushion_min: Money::from_cents(100),
        floor_epu: Money::from_cents(50),
        strategy: StrategyCoefficients::STANDARD,
    };

    /// Total cost of processing one returned unit.
    pub fn return_cost(&self) -> Money {
        self.return_shipping_cost
            .saturating_add(self.restock_cost)
            .saturating_add(self.handling_cost)
    }

    /// Net rate in basis points; may be zero or negative for broken constants.
    pub fn net_rate_bps(&self) -> i64 {
        Rate::ONE.bps() as i64
            - self.processing_fee_rate.bps() as i64
            - self.tax_rate.bps() as i64
            - self.expected_discount_rate.bps() as i64
    }
}

impl Default for EngineConstants {
    fn default() -> Self {
        Self::STANDARD
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
