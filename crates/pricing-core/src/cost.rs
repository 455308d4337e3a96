//! # Cost Model
//!
//! Turns a landed cost into the effective cost the rest of the pipeline
//! prices against.
//!
//! ```text
//! refund_safety_net = round(refund_rate × (return shipping + restock + handling))
//! effective_cost    = landed_cost + refund_safety_net
//! ```
//!
//! The safety net is a flat amount per unit: the expected cost of returns
//! does not depend on what the item costs.

use crate::constants::EngineConstants;
use crate::money::Money;

/// Amortized cost of refunds, returns and restocking per unit sold.
///
/// 54 with the standard constants (8% of 680 = 54.4).
pub fn refund_safety_net(constants: &EngineConstants) -> Money {
    constants.return_cost().apply_rate(constants.refund_rate)
}

/// Effective cost for a landed cost, or `None` when there is nothing to price.
///
/// A landed cost of zero (or below) short-circuits the whole pipeline.
pub fn effective_cost(landed_cost: Money, constants: &EngineConstants) -> Option<Money> {
    if !landed_cost.is_positive() {
        return None;
    }
    Some(landed_cost.saturating_add(refund_safety_net(constants)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rate;

    #[test]
    fn test_standard_safety_net() {
        assert_eq!(refund_safety_net(&EngineConstants::STANDARD).cents(), 54);
    }

    #[test]
    fn test_effective_cost_adds_flat_net() {
        let c = EngineConstants::STANDARD;
        assert_eq!(effective_cost(Money::from_cents(1000), &c).unwrap().cents(), 1054);
        assert_eq!(effective_cost(Money::from_cents(2000), &c).unwrap().cents(), 2054);
        assert_eq!(effective_cost(Money::from_cents(1), &c).unwrap().cents(), 55);
    }

    #[test]
    fn test_zero_or_negative_cost_short_circuits() {
        let c = EngineConstants::STANDARD;
        assert!(effective_cost(Money::zero(), &c).is_none());
        assert!(effective_cost(Money::from_cents(-100), &c).is_none());
    }

    #[test]
    fn test_huge_cost_saturates() {
        let c = EngineConstants::STANDARD;
        let effective = effective_cost(Money::from_cents(i64::MAX - 10), &c).unwrap();
        assert_eq!(effective.cents(), i64::MAX);
    }

    #[test]
    fn test_safety_net_follows_constants() {
        let c = EngineConstants {
            refund_rate: Rate::zero(),
            ..EngineConstants::STANDARD
        };
        assert_eq!(effective_cost(Money::from_cents(1000), &c).unwrap().cents(), 1000);
    }
}
