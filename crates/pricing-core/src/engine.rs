//! # Pricing Engine
//!
//! Runs the pipeline end to end.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  landed cost ──► CostModel ──► effective cost                          │
//! │                                     │                                   │
//! │  strategy ─────► StrategyResolver ◄─┘──► target EPU                    │
//! │                                              │                          │
//! │  tone ─────────► ToneAdjuster ◄──────────────┘──► adjusted EPU         │
//! │                                                       │                 │
//! │                  PriceSolver ◄────────────────────────┘──► final price │
//! │                                                                         │
//! │  compute_price() and explain_price() both read the same PricingTrace,  │
//! │  so the explanation can never disagree with the applied price.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::breakdown::{self, PriceExplanation};
use crate::constants::EngineConstants;
use crate::cost;
use crate::error::CoreResult;
use crate::money::Money;
use crate::solver::PriceSolver;
use crate::strategy::PricingStrategy;
use crate::tone::Tone;
use crate::validation::{validate_non_negative, validate_rate_bps};

// =============================================================================
// Results
// =============================================================================

/// The recommended price and the figures it was derived from.
///
/// Profit targets are rounded for display; the price itself was solved from
/// the unrounded targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub effective_cost: Money,
    pub target_epu: Money,
    pub adjusted_epu: Money,
    /// Fraction of the list price the seller keeps, in (0, 1].
    pub net_rate: f64,
    pub final_price: Money,
}

/// Every intermediate value of one pipeline run, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingTrace {
    pub landed_cost: Money,
    pub refund_safety_net: Money,
    pub effective_cost: Money,
    pub target_epu: f64,
    pub adjusted_epu: f64,
    pub fixed_processing_fee: Money,
    pub net_rate: f64,
    pub raw_price: f64,
    pub final_price: Money,
}

// =============================================================================
// Engine
// =============================================================================

/// Stateless pricing engine over one immutable set of constants.
///
/// Cheap to copy and safe to share between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingEngine {
    constants: EngineConstants,
    solver: PriceSolver,
}

impl PricingEngine {
    /// Builds an engine, validating the constants.
    ///
    /// ## Errors
    /// - `InvalidConstants` if a rate exceeds 100% or an amount is negative
    /// - `NonPositiveNetRate` if fees, discount and tax leave nothing to keep
    pub fn new(constants: EngineConstants) -> CoreResult<Self> {
        validate_rate_bps("refund_rate", constants.refund_rate)?;
        validate_rate_bps("processing_fee_rate", constants.processing_fee_rate)?;
        validate_rate_bps("expected_discount_rate", constants.expected_discount_rate)?;
        validate_rate_bps("tax_rate", constants.tax_rate)?;
        validate_rate_bps("volume_margin", constants.strategy.volume_margin)?;
        validate_rate_bps("inventory_margin", constants.strategy.inventory_margin)?;

        for (field, amount) in [
            ("return_shipping_cost", constants.return_shipping_cost),
            ("restock_cost", constants.restock_cost),
            ("handling_cost", constants.handling_cost),
            ("fixed_processing_fee", constants.fixed_processing_fee),
            ("cushion_min", constants.cushion_min),
            ("floor_epu", constants.floor_epu),
            ("unit_profit_epu", constants.strategy.unit_profit_epu),
            ("revenue_epu", constants.strategy.revenue_epu),
        ] {
            validate_non_negative(field, amount)?;
        }

        let solver = PriceSolver::new(&constants)?;
        debug!(net_rate = solver.net_rate(), "Pricing engine ready");

        Ok(PricingEngine { constants, solver })
    }

    /// Builds an engine over the standard constants.
    pub fn standard() -> CoreResult<Self> {
        Self::new(EngineConstants::STANDARD)
    }

    pub fn constants(&self) -> &EngineConstants {
        &self.constants
    }

    /// Fraction of the list price the seller keeps.
    pub fn net_rate(&self) -> f64 {
        self.solver.net_rate()
    }

    /// Runs the pipeline, or returns `None` when the landed cost is not positive.
    pub fn trace(&self, landed_cost: Money, strategy: PricingStrategy, tone: Tone) -> Option<PricingTrace> {
        let effective_cost = cost::effective_cost(landed_cost, &self.constants)?;
        let target_epu = strategy.target_epu(effective_cost, &self.constants);
        let adjusted_epu = tone.adjust(target_epu);
        let raw_price = self.solver.raw_price(adjusted_epu, effective_cost);

        Some(PricingTrace {
            landed_cost,
            refund_safety_net: cost::refund_safety_net(&self.constants),
            effective_cost,
            target_epu,
            adjusted_epu,
            fixed_processing_fee: self.solver.fixed_processing_fee(),
            net_rate: self.solver.net_rate(),
            raw_price,
            final_price: Money::round_half_up(raw_price),
        })
    }

    /// Recommended list price for one unit.
    ///
    /// A landed cost of zero or less prices to zero.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::{Money, PricingEngine, PricingStrategy, Tone};
    ///
    /// let engine = PricingEngine::standard().unwrap();
    /// let result = engine.compute_price(Money::from_cents(2000), PricingStrategy::Premium, Tone::Normal);
    /// assert_eq!(result.effective_cost.cents(), 2054);
    /// assert_eq!(result.final_price.cents(), 4047);
    /// ```
    pub fn compute_price(&self, landed_cost: Money, strategy: PricingStrategy, tone: Tone) -> PricingResult {
        match self.trace(landed_cost, strategy, tone) {
            Some(trace) => PricingResult {
                effective_cost: trace.effective_cost,
                target_epu: Money::round_half_up(trace.target_epu),
                adjusted_epu: Money::round_half_up(trace.adjusted_epu),
                net_rate: trace.net_rate,
                final_price: trace.final_price,
            },
            None => PricingResult {
                effective_cost: Money::zero(),
                target_epu: Money::zero(),
                adjusted_epu: Money::zero(),
                net_rate: self.solver.net_rate(),
                final_price: Money::zero(),
            },
        }
    }

    /// Step-by-step account of how the price was built, plus stock totals.
    pub fn explain_price(
        &self,
        landed_cost: Money,
        strategy: PricingStrategy,
        tone: Tone,
        stock_quantity: i64,
        current_price: Money,
    ) -> PriceExplanation {
        breakdown::explain(
            &self.constants,
            self.trace(landed_cost, strategy, tone),
            strategy,
            tone,
            stock_quantity,
            current_price,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
