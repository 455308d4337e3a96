//! # Price Board
//!
//! Shared store of variants and their recommended prices.
//!
//! ## Thread Safety
//! Each variant is wrapped in its own `Arc<Mutex<Variant>>`:
//! 1. A trigger holds one variant's lock for the whole
//!    apply → compute → compare → write sequence
//! 2. Triggers on different variants never wait on each other
//! 3. Concurrent triggers on the same variant serialize; last applied wins
//!
//! ## Board Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Price Board Operations                               │
//! │                                                                         │
//! │  Caller Action            Board Method            State Change          │
//! │  ─────────────            ────────────            ────────────          │
//! │                                                                         │
//! │  New product ────────────► create() / insert() ─► variants[id] = v     │
//! │                                                    price reconciled     │
//! │                                                                         │
//! │  Edit cost/strategy/tone ► trigger() ───────────► v.input = new         │
//! │                                                    price rewritten if   │
//! │                                                    it moved             │
//! │                                                                         │
//! │  "Why this price?" ──────► explain() ───────────► (read only)          │
//! │                                                                         │
//! │  Audit ──────────────────► writes() ────────────► (read only)          │
//! │                                                                         │
//! │  NOTE: The map itself sits behind an RwLock; it is only write-locked   │
//! │        to add or remove variants.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lock order is always map → variant → write log.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use pricing_core::validation::{
    validate_currency_code, validate_landed_cost, validate_quantity, validate_variant_id,
};
use pricing_core::{
    Money, Price, PriceExplanation, PricingEngine, PricingStrategy, RecalcOutcome, RecalcTrigger,
    RecalculationPolicy, Tone, Variant,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{BoardSettings, PricingConfig};
use crate::error::{StateError, StateResult};

// =============================================================================
// Write Log
// =============================================================================

/// One rewrite of a variant's stored price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceWrite {
    pub variant_id: String,

    pub previous: Price,

    pub current: Price,

    /// The input changes that caused the write, in the order applied.
    /// Empty for a reconcile without an input change, such as when a
    /// variant joins the board.
    pub triggers: Vec<RecalcTrigger>,

    pub written_at: DateTime<Utc>,
}

// =============================================================================
// Price Board
// =============================================================================

type SharedVariant = Arc<Mutex<Variant>>;

/// Variants keyed by id, each repriced in place as its inputs change.
#[derive(Debug)]
pub struct PriceBoard {
    engine: PricingEngine,
    settings: BoardSettings,
    variants: RwLock<HashMap<String, SharedVariant>>,
    writes: Mutex<VecDeque<PriceWrite>>,
}

impl PriceBoard {
    /// Creates an empty board with default settings.
    pub fn new(engine: PricingEngine) -> Self {
        Self::build(engine, BoardSettings::default())
    }

    /// Creates an empty board with custom settings.
    ///
    /// ## Errors
    /// - `InvalidConfig` if the write log capacity is zero
    /// - `Validation` if the default currency is not an ISO 4217 code
    pub fn with_settings(engine: PricingEngine, settings: BoardSettings) -> StateResult<Self> {
        settings.validate()?;
        Ok(Self::build(engine, settings))
    }

    fn build(engine: PricingEngine, settings: BoardSettings) -> Self {
        PriceBoard {
            engine,
            settings,
            variants: RwLock::new(HashMap::new()),
            writes: Mutex::new(VecDeque::new()),
        }
    }

    /// Builds a board from a loaded configuration.
    pub fn from_config(config: &PricingConfig) -> StateResult<Self> {
        config.validate()?;
        let engine = config.build_engine()?;
        info!(
            net_rate = engine.net_rate(),
            currency = %config.board.default_currency,
            "Price board ready"
        );
        Self::with_settings(engine, config.board.clone())
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    // =========================================================================
    // Adding and Removing Variants
    // =========================================================================

    /// Adds a variant and prices it.
    ///
    /// ## Returns
    /// - `Ok(outcome)` of the initial reconcile
    /// - `Err(DuplicateVariant)` if the id is already on the board
    /// - `Err(Validation)` for a malformed id, currency, cost or quantity
    pub fn insert(&self, mut variant: Variant) -> StateResult<RecalcOutcome> {
        validate_variant_id(&variant.id)?;
        validate_currency_code(&variant.default_price.currency)?;
        validate_landed_cost(variant.landed_cost)?;
        validate_quantity(variant.qty_soh)?;

        let mut variants = self.variants.write()?;
        if variants.contains_key(&variant.id) {
            return Err(StateError::DuplicateVariant(variant.id));
        }

        let outcome = RecalculationPolicy::new(self.engine).reconcile(&mut variant);
        self.record(&variant.id, &outcome, &[])?;

        debug!(
            variant_id = %variant.id,
            price = %outcome.price(),
            "Variant added to price board"
        );
        variants.insert(variant.id.clone(), Arc::new(Mutex::new(variant)));
        Ok(outcome)
    }

    /// Creates a variant with a fresh id in the board's default currency.
    pub fn create(
        &self,
        landed_cost: Money,
        strategy: PricingStrategy,
        tone: Tone,
        qty_soh: i64,
    ) -> StateResult<Variant> {
        let mut variant = Variant::new(
            Uuid::new_v4().to_string(),
            landed_cost,
            self.settings.default_currency.clone(),
        );
        variant.pricing_strategy = strategy;
        variant.tone = tone;
        variant.qty_soh = qty_soh;

        let id = variant.id.clone();
        self.insert(variant)?;
        self.get(&id)
    }

    /// Removes a variant, returning its last state.
    pub fn remove(&self, id: &str) -> StateResult<Variant> {
        let shared = self
            .variants
            .write()?
            .remove(id)
            .ok_or_else(|| StateError::VariantNotFound(id.to_string()))?;

        let variant = shared.lock()?.clone();
        debug!(variant_id = %id, "Variant removed from price board");
        Ok(variant)
    }

    // =========================================================================
    // Repricing
    // =========================================================================

    /// Applies an input change and rewrites the price if it moved.
    ///
    /// The variant stays locked from applying the change until the write
    /// (if any) is logged, so no other trigger can interleave.
    pub fn trigger(&self, id: &str, trigger: RecalcTrigger) -> StateResult<RecalcOutcome> {
        validate_trigger(&trigger)?;

        let shared = self.lookup(id)?;
        let mut variant = shared.lock()?;

        let outcome = RecalculationPolicy::new(self.engine).apply(&mut variant, trigger);
        self.record(id, &outcome, &[trigger])?;
        Ok(outcome)
    }

    /// Applies several changes to one variant under a single lock.
    ///
    /// Only the final price is compared against the stored one, so a batch
    /// that ends where it started writes nothing. A write logs the whole
    /// batch.
    pub fn trigger_all(&self, id: &str, triggers: &[RecalcTrigger]) -> StateResult<RecalcOutcome> {
        for trigger in triggers {
            validate_trigger(trigger)?;
        }

        let shared = self.lookup(id)?;
        let mut variant = shared.lock()?;

        for trigger in triggers {
            trigger.apply_to(&mut variant);
        }
        let outcome = RecalculationPolicy::new(self.engine).reconcile(&mut variant);
        self.record(id, &outcome, triggers)?;
        Ok(outcome)
    }

    /// Reprices every variant, e.g. after the engine constants changed.
    ///
    /// Returns the number of prices rewritten.
    pub fn reconcile_all(&self) -> StateResult<usize> {
        let shared: Vec<(String, SharedVariant)> = self
            .variants
            .read()?
            .iter()
            .map(|(id, v)| (id.clone(), Arc::clone(v)))
            .collect();

        let mut written = 0;
        for (id, variant) in shared {
            let mut variant = variant.lock()?;
            let outcome = RecalculationPolicy::new(self.engine).reconcile(&mut variant);
            if outcome.is_write() {
                written += 1;
            }
            self.record(&id, &outcome, &[])?;
        }

        info!(written, "Price board reconciled");
        Ok(written)
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Returns a snapshot of a variant.
    pub fn get(&self, id: &str) -> StateResult<Variant> {
        let shared = self.lookup(id)?;
        let variant = shared.lock()?;
        Ok(variant.clone())
    }

    /// Explains a variant's price against its stored price and stock.
    pub fn explain(&self, id: &str) -> StateResult<PriceExplanation> {
        let shared = self.lookup(id)?;
        let variant = shared.lock()?;
        Ok(self.engine.explain_price(
            variant.landed_cost,
            variant.pricing_strategy,
            variant.tone,
            variant.qty_soh,
            variant.default_price.amount,
        ))
    }

    /// Snapshot of the write log, oldest first.
    pub fn writes(&self) -> StateResult<Vec<PriceWrite>> {
        Ok(self.writes.lock()?.iter().cloned().collect())
    }

    /// Writes logged for one variant, oldest first.
    pub fn writes_for(&self, id: &str) -> StateResult<Vec<PriceWrite>> {
        Ok(self
            .writes
            .lock()?
            .iter()
            .filter(|w| w.variant_id == id)
            .cloned()
            .collect())
    }

    /// Variant ids, sorted.
    pub fn ids(&self) -> StateResult<Vec<String>> {
        let mut ids: Vec<String> = self.variants.read()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    pub fn len(&self) -> StateResult<usize> {
        Ok(self.variants.read()?.len())
    }

    pub fn is_empty(&self) -> StateResult<bool> {
        Ok(self.variants.read()?.is_empty())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lookup(&self, id: &str) -> StateResult<SharedVariant> {
        self.variants
            .read()?
            .get(id)
            .cloned()
            .ok_or_else(|| StateError::VariantNotFound(id.to_string()))
    }

    fn record(
        &self,
        id: &str,
        outcome: &RecalcOutcome,
        triggers: &[RecalcTrigger],
    ) -> StateResult<()> {
        let RecalcOutcome::Written { previous, current } = outcome else {
            return Ok(());
        };

        let mut writes = self.writes.lock()?;
        if writes.len() >= self.settings.write_log_capacity.max(1) {
            writes.pop_front();
        }
        writes.push_back(PriceWrite {
            variant_id: id.to_string(),
            previous: previous.clone(),
            current: current.clone(),
            triggers: triggers.to_vec(),
            written_at: Utc::now(),
        });
        Ok(())
    }
}

/// Rejects trigger values the form layer would not accept.
fn validate_trigger(trigger: &RecalcTrigger) -> StateResult<()> {
    match *trigger {
        RecalcTrigger::LandedCostChanged(cost) => validate_landed_cost(cost)?,
        RecalcTrigger::QuantityChanged(qty) => validate_quantity(qty)?,
        RecalcTrigger::StrategyChanged(_) | RecalcTrigger::ToneChanged(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn board() -> PriceBoard {
        PriceBoard::new(PricingEngine::standard().unwrap())
    }

    fn variant(cost: i64) -> Variant {
        Variant::new(ID, Money::from_cents(cost), "USD")
    }

    #[test]
    fn test_insert_prices_variant() {
        let board = board();
        let outcome = board.insert(variant(1000)).unwrap();

        assert!(outcome.is_write());
        assert_eq!(board.get(ID).unwrap().default_price, Price::new(Money::from_cents(1828), "USD"));
        assert_eq!(board.len().unwrap(), 1);

        let writes = board.writes().unwrap();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].triggers.is_empty());
        assert_eq!(writes[0].previous.amount, Money::zero());
    }

    #[test]
    fn test_insert_rejects_duplicates_and_bad_input() {
        let board = board();
        board.insert(variant(1000)).unwrap();
        assert!(matches!(board.insert(variant(500)), Err(StateError::DuplicateVariant(_))));

        let bad_id = Variant::new("not-a-uuid", Money::from_cents(1000), "USD");
        assert!(matches!(board.insert(bad_id), Err(StateError::Validation(_))));

        let bad_currency = Variant::new(Uuid::new_v4().to_string(), Money::from_cents(1000), "usd");
        assert!(matches!(board.insert(bad_currency), Err(StateError::Validation(_))));

        let negative = Variant::new(Uuid::new_v4().to_string(), Money::from_cents(-1), "USD");
        assert!(matches!(board.insert(negative), Err(StateError::Validation(_))));
    }

    #[test]
    fn test_insert_rejects_cost_above_limit() {
        let board = board();
        let huge = Variant::new(ID, Money::from_cents(i64::MAX - 10), "USD");
        assert!(matches!(board.insert(huge), Err(StateError::Validation(_))));

        let at_limit = Variant::new(ID, Money::from_cents(pricing_core::MAX_LANDED_COST), "USD");
        assert!(board.insert(at_limit).unwrap().is_write());

        let err = board
            .trigger(ID, RecalcTrigger::LandedCostChanged(Money::from_cents(i64::MAX)))
            .unwrap_err();
        assert!(matches!(err, StateError::Validation(_)));
    }

    #[test]
    fn test_create_uses_default_currency() {
        let board = board();
        let variant = board
            .create(Money::from_cents(2000), PricingStrategy::Premium, Tone::Normal, 5)
            .unwrap();

        assert!(Uuid::parse_str(&variant.id).is_ok());
        assert_eq!(variant.default_price.currency, "USD");
        assert_eq!(variant.default_price.amount.cents(), 4047);
        assert_eq!(variant.qty_soh, 5);
    }

    #[test]
    fn test_trigger_writes_only_when_price_moves() {
        let board = board();
        board.insert(variant(1000)).unwrap();

        let outcome = board.trigger(ID, RecalcTrigger::ToneChanged(Tone::Push)).unwrap();
        assert!(outcome.is_write());
        assert_eq!(outcome.price().amount.cents(), 1894);

        let outcome = board.trigger(ID, RecalcTrigger::ToneChanged(Tone::Push)).unwrap();
        assert!(!outcome.is_write());
        let outcome = board.trigger(ID, RecalcTrigger::QuantityChanged(12)).unwrap();
        assert!(!outcome.is_write());

        let writes = board.writes_for(ID).unwrap();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].triggers, vec![RecalcTrigger::ToneChanged(Tone::Push)]);
        assert_eq!(board.get(ID).unwrap().qty_soh, 12);
    }

    #[test]
    fn test_trigger_validates_input() {
        let board = board();
        board.insert(variant(1000)).unwrap();

        let err = board
            .trigger(ID, RecalcTrigger::LandedCostChanged(Money::from_cents(-5)))
            .unwrap_err();
        assert!(matches!(err, StateError::Validation(_)));
        assert_eq!(board.get(ID).unwrap().landed_cost.cents(), 1000);

        let err = board.trigger("missing", RecalcTrigger::ToneChanged(Tone::Ease)).unwrap_err();
        assert!(matches!(err, StateError::VariantNotFound(_)));
    }

    #[test]
    fn test_trigger_all_round_trip_writes_nothing() {
        let board = board();
        board.insert(variant(1000)).unwrap();

        let outcome = board
            .trigger_all(
                ID,
                &[
                    RecalcTrigger::LandedCostChanged(Money::from_cents(3000)),
                    RecalcTrigger::LandedCostChanged(Money::from_cents(1000)),
                ],
            )
            .unwrap();
        assert!(!outcome.is_write());
        assert_eq!(board.writes().unwrap().len(), 1);
    }

    #[test]
    fn test_trigger_all_logs_every_change() {
        let board = board();
        board.insert(variant(1000)).unwrap();

        let batch = [
            RecalcTrigger::LandedCostChanged(Money::from_cents(2000)),
            RecalcTrigger::ToneChanged(Tone::Push),
        ];
        assert!(board.trigger_all(ID, &batch).unwrap().is_write());

        let writes = board.writes_for(ID).unwrap();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].triggers, batch.to_vec());
    }

    #[test]
    fn test_explain_uses_stored_price() {
        let board = board();
        let mut v = variant(1000);
        v.qty_soh = 10;
        board.insert(v).unwrap();

        let explanation = board.explain(ID).unwrap();
        assert_eq!(explanation.final_price().cents(), 1828);
        assert_eq!(explanation.totals.stock_quantity, 10);
        assert!(!explanation.totals.is_stale);
    }

    #[test]
    fn test_zero_write_log_capacity_rejected() {
        let settings = BoardSettings {
            write_log_capacity: 0,
            ..BoardSettings::default()
        };
        let result = PriceBoard::with_settings(PricingEngine::standard().unwrap(), settings);
        assert!(matches!(result, Err(StateError::InvalidConfig(_))));

        let settings = BoardSettings {
            default_currency: "usd".to_string(),
            ..BoardSettings::default()
        };
        let result = PriceBoard::with_settings(PricingEngine::standard().unwrap(), settings);
        assert!(matches!(result, Err(StateError::Validation(_))));
    }

    #[test]
    fn test_write_log_capacity_of_one() {
        let settings = BoardSettings {
            write_log_capacity: 1,
            ..BoardSettings::default()
        };
        let board = PriceBoard::with_settings(PricingEngine::standard().unwrap(), settings).unwrap();
        board.insert(variant(1000)).unwrap();
        board.trigger(ID, RecalcTrigger::ToneChanged(Tone::Ease)).unwrap();

        let writes = board.writes().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].triggers, vec![RecalcTrigger::ToneChanged(Tone::Ease)]);
    }

    #[test]
    fn test_write_log_capacity() {
        let settings = BoardSettings {
            write_log_capacity: 2,
            ..BoardSettings::default()
        };
        let board = PriceBoard::with_settings(PricingEngine::standard().unwrap(), settings).unwrap();
        board.insert(variant(1000)).unwrap();

        for cost in [1100, 1200, 1300] {
            board
                .trigger(ID, RecalcTrigger::LandedCostChanged(Money::from_cents(cost)))
                .unwrap();
        }

        let writes = board.writes().unwrap();
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[1].triggers,
            vec![RecalcTrigger::LandedCostChanged(Money::from_cents(1300))]
        );
    }

    #[test]
    fn test_settled_variant_reprices_under_new_constants() {
        let board = board();
        board.insert(variant(1000)).unwrap();
        assert_eq!(board.reconcile_all().unwrap(), 0);
        let stored = board.get(ID).unwrap();

        // No expected discount: net rate 0.971
        let cheaper = PricingEngine::new(pricing_core::EngineConstants {
            expected_discount_rate: pricing_core::Rate::zero(),
            ..pricing_core::EngineConstants::STANDARD
        })
        .unwrap();
        let repriced = PriceBoard::new(cheaper);

        let outcome = repriced.insert(stored).unwrap();
        assert!(outcome.is_write());
        // (600 + 1054 + 30) / 0.971 = 1734.3
        assert_eq!(outcome.price().amount.cents(), 1734);
        assert_eq!(repriced.reconcile_all().unwrap(), 0);
    }

    #[test]
    fn test_remove() {
        let board = board();
        board.insert(variant(1000)).unwrap();

        let removed = board.remove(ID).unwrap();
        assert_eq!(removed.id, ID);
        assert!(board.is_empty().unwrap());
        assert!(matches!(board.remove(ID), Err(StateError::VariantNotFound(_))));
    }
}
