//! # Breakdown Explainer
//!
//! Restates a pipeline run as ordered, labeled steps for the "why this
//! price" view, plus a few stock-level figures.
//!
//! Nothing here computes a price. The steps are read off the same
//! [`PricingTrace`] that [`PricingEngine::compute_price`] returns from, so
//! the explanation and the applied price cannot drift apart.
//!
//! [`PricingEngine::compute_price`]: crate::engine::PricingEngine::compute_price

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::EngineConstants;
use crate::engine::PricingTrace;
use crate::money::Money;
use crate::strategy::PricingStrategy;
use crate::tone::Tone;

// =============================================================================
// Steps
// =============================================================================

/// Which pipeline quantity a step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    LandedCost,
    RefundSafetyNet,
    EffectiveCost,
    TargetEpu,
    AdjustedEpu,
    FixedProcessingFee,
    NetRate,
    FinalPrice,
}

impl StepKind {
    /// Whether the step's value is an amount of money (everything but the net rate).
    pub const fn is_monetary(&self) -> bool {
        !matches!(self, StepKind::NetRate)
    }
}

/// One line of the explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownStep {
    pub kind: StepKind,
    pub title: String,
    /// Exact pipeline value: minor units, or a ratio for the net rate.
    pub value: f64,
    pub description: String,
}

impl BreakdownStep {
    fn new(kind: StepKind, title: &str, value: f64, description: String) -> Self {
        BreakdownStep {
            kind,
            title: title.to_string(),
            value,
            description,
        }
    }

    /// Rounded amount for display, or `None` for the net rate.
    pub fn amount(&self) -> Option<Money> {
        self.kind
            .is_monetary()
            .then(|| Money::round_half_up(self.value))
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Stock-level figures. Informational; they never feed back into the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceTotals {
    pub stock_quantity: i64,
    /// Adjusted EPU across all stock on hand.
    pub total_profit: Money,
    /// Recommended price across all stock on hand.
    pub total_revenue: Money,
    /// How many refunds at this price would wipe out the stock's profit.
    pub refunds_to_zero_profit: i64,
    /// The price currently stored on the variant.
    pub current_price: Money,
    /// Recommended minus current.
    pub price_delta: Money,
    /// Whether the stored price differs from the recommendation.
    pub is_stale: bool,
}

/// Full "why this price" payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceExplanation {
    /// Empty when the landed cost is not positive.
    pub steps: Vec<BreakdownStep>,
    pub strategy_rationale: String,
    pub tone_rationale: String,
    pub totals: PriceTotals,
}

impl PriceExplanation {
    /// Whether there was anything to explain.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Looks up a step by kind.
    pub fn step(&self, kind: StepKind) -> Option<&BreakdownStep> {
        self.steps.iter().find(|step| step.kind == kind)
    }

    /// The recommended price, as shown in the last step.
    pub fn final_price(&self) -> Money {
        self.step(StepKind::FinalPrice)
            .and_then(BreakdownStep::amount)
            .unwrap_or_default()
    }
}

// =============================================================================
// Explain
// =============================================================================

/// Builds the explanation for a pipeline run (`None` = nothing to price).
pub(crate) fn explain(
    constants: &EngineConstants,
    trace: Option<PricingTrace>,
    strategy: PricingStrategy,
    tone: Tone,
    stock_quantity: i64,
    current_price: Money,
) -> PriceExplanation {
    let (steps, totals) = match trace {
        Some(trace) => (
            steps(constants, &trace, strategy, tone),
            totals(&trace, stock_quantity, current_price),
        ),
        None => (
            Vec::new(),
            PriceTotals {
                stock_quantity,
                total_profit: Money::zero(),
                total_revenue: Money::zero(),
                refunds_to_zero_profit: stock_quantity,
                current_price,
                price_delta: Money::zero().saturating_sub(current_price),
                is_stale: !current_price.is_zero(),
            },
        ),
    };

    PriceExplanation {
        steps,
        strategy_rationale: strategy.rationale(constants),
        tone_rationale: tone.rationale().to_string(),
        totals,
    }
}

fn steps(
    constants: &EngineConstants,
    trace: &PricingTrace,
    strategy: PricingStrategy,
    tone: Tone,
) -> Vec<BreakdownStep> {
    vec![
        BreakdownStep::new(
            StepKind::LandedCost,
            "Landed cost",
            trace.landed_cost.as_f64(),
            "What one unit costs you to acquire or produce.".to_string(),
        ),
        BreakdownStep::new(
            StepKind::RefundSafetyNet,
            "Refund safety net",
            trace.refund_safety_net.as_f64(),
            format!(
                "{} of the {} it costs to ship back, restock and handle a return, set aside on every unit.",
                constants.refund_rate,
                constants.return_cost()
            ),
        ),
        BreakdownStep::new(
            StepKind::EffectiveCost,
            "Effective cost",
            trace.effective_cost.as_f64(),
            "Landed cost plus the refund safety net.".to_string(),
        ),
        BreakdownStep::new(
            StepKind::TargetEpu,
            "Target profit per unit",
            trace.target_epu,
            format!("What the {} strategy aims to earn on each unit.", strategy),
        ),
        BreakdownStep::new(
            StepKind::AdjustedEpu,
            "Tone adjustment",
            trace.adjusted_epu,
            format!(
                "The target scaled by the {} tone ({} of target).",
                tone,
                tone.multiplier()
            ),
        ),
        BreakdownStep::new(
            StepKind::FixedProcessingFee,
            "Processing fee",
            trace.fixed_processing_fee.as_f64(),
            "Flat per-sale fee charged by the payment processor.".to_string(),
        ),
        BreakdownStep::new(
            StepKind::NetRate,
            "Net rate",
            trace.net_rate,
            format!(
                "Share of the price you keep after the {} processing fee, {} expected discount and {} tax.",
                constants.processing_fee_rate, constants.expected_discount_rate, constants.tax_rate
            ),
        ),
        BreakdownStep::new(
            StepKind::FinalPrice,
            "Recommended price",
            trace.final_price.as_f64(),
            "Effective cost, adjusted profit and processing fee, divided by the net rate.".to_string(),
        ),
    ]
}

fn totals(trace: &PricingTrace, stock_quantity: i64, current_price: Money) -> PriceTotals {
    let total_profit = Money::round_half_up(trace.adjusted_epu * stock_quantity as f64);
    let margin = trace.final_price.saturating_sub(trace.landed_cost);

    let refunds_to_zero_profit = if margin.is_positive() {
        (total_profit.cents() / margin.cents()).max(1)
    } else {
        stock_quantity
    };

    PriceTotals {
        stock_quantity,
        total_profit,
        total_revenue: trace.final_price.multiply_quantity(stock_quantity),
        refunds_to_zero_profit,
        current_price,
        price_delta: trace.final_price.saturating_sub(current_price),
        is_stale: trace.final_price != current_price,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
