//! Property tests for the pricing pipeline
//!
//! These check behaviour that must hold for every strategy and tone, not
//! just the worked examples in the unit tests.

use pricing_core::{
    Money, PricingEngine, PricingStrategy, RecalcTrigger, RecalculationPolicy, StepKind, Tone,
    Variant,
};

// === TEST FIXTURES ===

fn engine() -> PricingEngine {
    PricingEngine::standard().unwrap()
}

/// Landed costs covering both sides of the volume cushion and inventory floor.
fn sample_costs() -> impl Iterator<Item = i64> {
    (0..=200).map(|i| i * 97).chain([1, 2, 1333, 1334, 25_000, 250_000])
}

// === PROPERTIES ===

#[test]
fn zero_cost_short_circuits_for_every_strategy_and_tone() {
    let engine = engine();
    for strategy in PricingStrategy::ALL {
        for tone in Tone::ALL {
            assert_eq!(
                engine.compute_price(Money::zero(), strategy, tone).final_price,
                Money::zero(),
                "{strategy} / {tone}"
            );
        }
    }
}

#[test]
fn price_is_non_decreasing_in_cost() {
    let engine = engine();
    for strategy in PricingStrategy::ALL {
        for tone in Tone::ALL {
            let mut previous = Money::zero();
            for cost in 0..5_000 {
                let price = engine.compute_price(Money::from_cents(cost), strategy, tone).final_price;
                assert!(
                    price >= previous,
                    "{strategy} / {tone}: cost {cost} priced {price} after {previous}"
                );
                previous = price;
            }
        }
    }
}

#[test]
fn tone_orders_prices() {
    let engine = engine();
    for strategy in PricingStrategy::ALL {
        for cost in sample_costs() {
            let cost = Money::from_cents(cost);
            let ease = engine.compute_price(cost, strategy, Tone::Ease).final_price;
            let normal = engine.compute_price(cost, strategy, Tone::Normal).final_price;
            let push = engine.compute_price(cost, strategy, Tone::Push).final_price;
            assert!(ease <= normal && normal <= push, "{strategy} at {cost}");
        }
    }
}

#[test]
fn compute_price_is_idempotent() {
    let engine = engine();
    for strategy in PricingStrategy::ALL {
        for tone in Tone::ALL {
            let cost = Money::from_cents(1234);
            assert_eq!(
                engine.compute_price(cost, strategy, tone),
                engine.compute_price(cost, strategy, tone)
            );
        }
    }
}

#[test]
fn breakdown_steps_reconstruct_the_price() {
    let engine = engine();
    for strategy in PricingStrategy::ALL {
        for tone in Tone::ALL {
            for cost in sample_costs().filter(|c| *c > 0) {
                let cost = Money::from_cents(cost);
                let explanation = engine.explain_price(cost, strategy, tone, 3, Money::zero());
                let value = |kind| explanation.step(kind).unwrap().value;

                let effective = value(StepKind::LandedCost) + value(StepKind::RefundSafetyNet);
                assert_eq!(effective, value(StepKind::EffectiveCost));

                let raw = (value(StepKind::AdjustedEpu) + effective + value(StepKind::FixedProcessingFee))
                    / value(StepKind::NetRate);
                let rebuilt = Money::round_half_up(raw);

                let applied = engine.compute_price(cost, strategy, tone).final_price;
                assert_eq!(rebuilt, applied, "{strategy} / {tone} at {cost}");
                assert_eq!(explanation.final_price(), applied);
            }
        }
    }
}

#[test]
fn policy_suppresses_redundant_writes() {
    let mut policy = RecalculationPolicy::new(engine());
    let mut variant = Variant::new("v-1", Money::from_cents(1000), "USD");

    assert!(policy.reconcile(&mut variant).is_write());

    // Same inputs, re-triggered in every way that leaves the price alone.
    let triggers = [
        RecalcTrigger::LandedCostChanged(Money::from_cents(1000)),
        RecalcTrigger::StrategyChanged(PricingStrategy::UnitProfit),
        RecalcTrigger::ToneChanged(Tone::Normal),
        RecalcTrigger::QuantityChanged(12),
    ];
    for trigger in triggers {
        assert!(!policy.apply(&mut variant, trigger).is_write(), "{trigger:?}");
    }
}

// === WORKED SCENARIOS ===

#[test]
fn scenario_unit_profit_normal() {
    let result = engine().compute_price(Money::from_cents(1000), PricingStrategy::UnitProfit, Tone::Normal);
    assert_eq!(result.effective_cost.cents(), 1054);
    assert_eq!(result.target_epu.cents(), 600);
    assert_eq!(result.adjusted_epu.cents(), 600);
    // (600 + 1054 + 30) / 0.921 = 1828.45
    assert_eq!(result.final_price.cents(), 1828);
}

#[test]
fn scenario_unit_profit_push() {
    let result = engine().compute_price(Money::from_cents(1000), PricingStrategy::UnitProfit, Tone::Push);
    assert_eq!(result.adjusted_epu.cents(), 660);
    // (660 + 1054 + 30) / 0.921 = 1893.59
    assert_eq!(result.final_price.cents(), 1894);
}

#[test]
fn scenario_premium_normal() {
    let result = engine().compute_price(Money::from_cents(2000), PricingStrategy::Premium, Tone::Normal);
    assert_eq!(result.effective_cost.cents(), 2054);
    // (1643.2 + 2054 + 30) / 0.921 = 4046.9
    assert_eq!(result.final_price.cents(), 4047);
}
