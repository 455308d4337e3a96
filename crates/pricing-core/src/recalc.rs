//! # Recalculation Policy
//!
//! Decides when a variant's stored price is rewritten.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            trigger                                                      │
//! │   ┌──────┐ ───────► ┌───────────┐   compute_price()                    │
//! │   │ Idle │          │ Computing │ ──────────────────┐                  │
//! │   └──────┘ ◄─────── └───────────┘                   │                  │
//! │       ▲      done                                   ▼                  │
//! │       │                               new == stored? ── yes ─► no write│
//! │       │                                      │                         │
//! │       └──────────────────────────────────── no ──► write amount,       │
//! │                                                    keep currency       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Feedback Loops
//! Triggers are landed cost, strategy, tone and quantity. The stored price is
//! an output only: [`RecalcTrigger`] has no price variant, so writing a price
//! cannot schedule another recalculation. With the compare-before-write
//! guard, re-running the policy on unchanged inputs writes nothing.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::engine::PricingEngine;
use crate::money::Money;
use crate::strategy::PricingStrategy;
use crate::tone::Tone;
use crate::types::{Price, Variant};

// =============================================================================
// Triggers
// =============================================================================

/// An input change on a variant that may move its price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecalcTrigger {
    StrategyChanged(PricingStrategy),
    ToneChanged(Tone),
    LandedCostChanged(Money),
    /// Does not move the price; only the explanation totals.
    QuantityChanged(i64),
}

impl RecalcTrigger {
    /// Writes the changed input onto the variant.
    pub fn apply_to(&self, variant: &mut Variant) {
        match *self {
            RecalcTrigger::StrategyChanged(strategy) => variant.pricing_strategy = strategy,
            RecalcTrigger::ToneChanged(tone) => variant.tone = tone,
            RecalcTrigger::LandedCostChanged(cost) => variant.landed_cost = cost,
            RecalcTrigger::QuantityChanged(qty) => variant.qty_soh = qty,
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// What a policy run did to the stored price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecalcOutcome {
    /// The recommendation matched the stored price; nothing was written.
    Unchanged { price: Price },
    /// The stored price was replaced.
    Written { previous: Price, current: Price },
}

impl RecalcOutcome {
    pub fn is_write(&self) -> bool {
        matches!(self, RecalcOutcome::Written { .. })
    }

    /// The price stored on the variant after the run.
    pub fn price(&self) -> &Price {
        match self {
            RecalcOutcome::Unchanged { price } => price,
            RecalcOutcome::Written { current, .. } => current,
        }
    }
}

// =============================================================================
// Policy
// =============================================================================

/// Where the policy is in a run. Only visible through `trace!` events; a
/// run is one synchronous call, so callers always observe `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyState {
    Idle,
    Computing,
}

/// Recompute-on-change with a compare-before-write guard.
#[derive(Debug, Clone)]
pub struct RecalculationPolicy {
    engine: PricingEngine,
    state: PolicyState,
}

impl RecalculationPolicy {
    pub fn new(engine: PricingEngine) -> Self {
        RecalculationPolicy {
            engine,
            state: PolicyState::Idle,
        }
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Applies an input change to the variant and reprices it.
    pub fn apply(&mut self, variant: &mut Variant, trigger: RecalcTrigger) -> RecalcOutcome {
        debug!(variant_id = %variant.id, ?trigger, "Price input changed");
        trigger.apply_to(variant);
        self.reconcile(variant)
    }

    /// Reprices a variant without an input change, e.g. right after creation.
    pub fn reconcile(&mut self, variant: &mut Variant) -> RecalcOutcome {
        self.transition(&variant.id, PolicyState::Computing);

        let recommended = self
            .engine
            .compute_price(variant.landed_cost, variant.pricing_strategy, variant.tone)
            .final_price;

        let outcome = if recommended == variant.default_price.amount {
            trace!(variant_id = %variant.id, price = %recommended, "Price unchanged, skipping write");
            RecalcOutcome::Unchanged {
                price: variant.default_price.clone(),
            }
        } else {
            let current = variant.default_price.with_amount(recommended);
            let previous = std::mem::replace(&mut variant.default_price, current.clone());
            debug!(
                variant_id = %variant.id,
                previous = %previous,
                current = %current,
                "Price rewritten"
            );
            RecalcOutcome::Written { previous, current }
        };

        self.transition(&variant.id, PolicyState::Idle);
        outcome
    }

    fn transition(&mut self, variant_id: &str, next: PolicyState) {
        trace!(variant_id, from = ?self.state, to = ?next, "Recalculation state");
        self.state = next;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
