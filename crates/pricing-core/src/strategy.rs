//! # Strategy Resolver
//!
//! Maps a pricing strategy and an effective cost to a target profit per unit
//! (EPU), before tone.
//!
//! ## Strategy Table
//! ```text
//! ┌──────────────┬────────────────────────────────────┬────────────────────┐
//! │ Strategy     │ Target EPU                         │ Standard values    │
//! ├──────────────┼────────────────────────────────────┼────────────────────┤
//! │ volume       │ max(cushion_min, margin × cost)    │ max(100, 7.5%)     │
//! │ unit-profit  │ flat                               │ 600                │
//! │ revenue      │ flat                               │ 500                │
//! │ inventory    │ max(floor_epu, margin × cost)      │ max(50, 2.5%)      │
//! │ premium      │ markup × cost                      │ 80%                │
//! │ risk-averse  │ markup × cost                      │ 30%                │
//! └──────────────┴────────────────────────────────────┴────────────────────┘
//! ```
//!
//! ## Unknown Strategies
//! Variants written by older storefront builds may carry strategy names this
//! engine does not know, or none at all. Pricing falls back to `unit-profit`
//! for those ([`PricingStrategy::from_str_lossy`], and the `Deserialize`
//! impl). The strict [`std::str::FromStr`] impl is for the form layer, which
//! should reject a typo instead of silently pricing it as `unit-profit`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::constants::EngineConstants;
use crate::error::ValidationError;
use crate::money::Money;

/// How aggressively a seller wants to trade margin for sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PricingStrategy {
    /// Thin margin to move units, never below the cushion.
    Volume,
    /// Flat profit per unit regardless of cost.
    #[default]
    UnitProfit,
    /// Flat, lower profit tuned toward aggregate sales goals.
    Revenue,
    /// Minimal margin to clear stock, never below the floor.
    Inventory,
    /// Large markup for brand positioning.
    Premium,
    /// Conservative markup.
    RiskAverse,
}

impl PricingStrategy {
    pub const ALL: [PricingStrategy; 6] = [
        PricingStrategy::Volume,
        PricingStrategy::UnitProfit,
        PricingStrategy::Revenue,
        PricingStrategy::Inventory,
        PricingStrategy::Premium,
        PricingStrategy::RiskAverse,
    ];

    /// Wire name of the strategy.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PricingStrategy::Volume => "volume",
            PricingStrategy::UnitProfit => "unit-profit",
            PricingStrategy::Revenue => "revenue",
            PricingStrategy::Inventory => "inventory",
            PricingStrategy::Premium => "premium",
            PricingStrategy::RiskAverse => "risk-averse",
        }
    }

    /// Parses a strategy name, falling back to `unit-profit` when unknown.
    pub fn from_str_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Target profit per unit for this strategy. May be fractional.
    pub fn target_epu(&self, effective_cost: Money, constants: &EngineConstants) -> f64 {
        let coefficients = &constants.strategy;
        let cost = effective_cost.as_f64();

        match self {
            PricingStrategy::Volume => constants
                .cushion_min
                .as_f64()
                .max(coefficients.volume_margin.of(cost)),
            PricingStrategy::UnitProfit => coefficients.unit_profit_epu.as_f64(),
            PricingStrategy::Revenue => coefficients.revenue_epu.as_f64(),
            PricingStrategy::Inventory => constants
                .floor_epu
                .as_f64()
                .max(coefficients.inventory_margin.of(cost)),
            PricingStrategy::Premium => coefficients.premium_markup.of(cost),
            PricingStrategy::RiskAverse => coefficients.risk_averse_markup.of(cost),
        }
    }

    /// Seller-facing reason for the strategy's target, shown in explanations.
    ///
    /// Quotes the engine's own coefficients, so a deployment with custom
    /// targets gets a rationale that matches its numbers.
    pub fn rationale(&self, constants: &EngineConstants) -> String {
        let coefficients = &constants.strategy;
        match self {
            PricingStrategy::Volume => format!(
                "Volume keeps the margin thin ({} of effective cost) to maximize units sold, but never below a {} cushion.",
                coefficients.volume_margin, constants.cushion_min
            ),
            PricingStrategy::UnitProfit => format!(
                "Unit profit aims for a flat {} on every unit, whatever the item costs.",
                coefficients.unit_profit_epu
            ),
            PricingStrategy::Revenue => format!(
                "Revenue aims for a flat {} per unit, tuned toward hitting overall sales goals.",
                coefficients.revenue_epu
            ),
            PricingStrategy::Inventory => format!(
                "Inventory takes a minimal margin ({} of effective cost) to clear stock quickly, never below {}.",
                coefficients.inventory_margin, constants.floor_epu
            ),
            PricingStrategy::Premium => format!(
                "Premium marks up effective cost by {} to position the item as a premium product.",
                coefficients.premium_markup
            ),
            PricingStrategy::RiskAverse => format!(
                "Risk-averse marks up effective cost by {}, a conservative baseline.",
                coefficients.risk_averse_markup
            ),
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingStrategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "volume" => Ok(PricingStrategy::Volume),
            "unit-profit" => Ok(PricingStrategy::UnitProfit),
            "revenue" => Ok(PricingStrategy::Revenue),
            "inventory" => Ok(PricingStrategy::Inventory),
            "premium" => Ok(PricingStrategy::Premium),
            "risk-averse" => Ok(PricingStrategy::RiskAverse),
            _ => Err(ValidationError::NotAllowed {
                field: "pricing_strategy".to_string(),
                allowed: Self::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for PricingStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(PricingStrategy::from_str_lossy)
            .unwrap_or_default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const C: EngineConstants = EngineConstants::STANDARD;

    fn epu(strategy: PricingStrategy, cost: i64) -> f64 {
        strategy.target_epu(Money::from_cents(cost), &C)
    }

    #[test]
    fn test_flat_strategies_ignore_cost() {
        assert_eq!(epu(PricingStrategy::UnitProfit, 55), 600.0);
        assert_eq!(epu(PricingStrategy::UnitProfit, 100_000), 600.0);
        assert_eq!(epu(PricingStrategy::Revenue, 1054), 500.0);
    }

    #[test]
    fn test_volume_cushion() {
        // 7.5% of 1054 = 79.05 < 100
        assert_eq!(epu(PricingStrategy::Volume, 1054), 100.0);
        // 7.5% of 4000 = 300
        assert_eq!(epu(PricingStrategy::Volume, 4000), 300.0);
    }

    #[test]
    fn test_inventory_floor() {
        // 2.5% of 1054 = 26.35 < 50
        assert_eq!(epu(PricingStrategy::Inventory, 1054), 50.0);
        // 2.5% of 10000 = 250
        assert_eq!(epu(PricingStrategy::Inventory, 10_000), 250.0);
    }

    #[test]
    fn test_markup_strategies() {
        assert!((epu(PricingStrategy::Premium, 2054) - 1643.2).abs() < 1e-9);
        assert!((epu(PricingStrategy::RiskAverse, 2054) - 616.2).abs() < 1e-9);
    }

    #[test]
    fn test_rationale_quotes_standard_coefficients() {
        assert!(PricingStrategy::UnitProfit.rationale(&C).contains("6.00"));
        assert!(PricingStrategy::Volume.rationale(&C).contains("7.50%"));
        assert!(PricingStrategy::Volume.rationale(&C).contains("1.00"));
        assert!(PricingStrategy::Premium.rationale(&C).contains("80.00%"));
    }

    #[test]
    fn test_rationale_follows_custom_coefficients() {
        let mut custom = C;
        custom.strategy.unit_profit_epu = Money::from_cents(900);
        custom.strategy.premium_markup = crate::types::Rate::from_bps(6500);
        custom.floor_epu = Money::from_cents(75);

        let unit = PricingStrategy::UnitProfit.rationale(&custom);
        assert!(unit.contains("9.00"));
        assert!(!unit.contains("6.00"));
        assert!(PricingStrategy::Premium.rationale(&custom).contains("65.00%"));
        assert!(PricingStrategy::Inventory.rationale(&custom).contains("0.75"));
    }

    #[test]
    fn test_strict_parsing() {
        assert_eq!("unit-profit".parse::<PricingStrategy>().unwrap(), PricingStrategy::UnitProfit);
        assert_eq!("Risk_Averse".parse::<PricingStrategy>().unwrap(), PricingStrategy::RiskAverse);
        assert!(matches!(
            "premuim".parse::<PricingStrategy>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_lossy_parsing_falls_back() {
        assert_eq!(PricingStrategy::from_str_lossy("premuim"), PricingStrategy::UnitProfit);
        assert_eq!(PricingStrategy::from_str_lossy(""), PricingStrategy::UnitProfit);
        assert_eq!(PricingStrategy::from_str_lossy("volume"), PricingStrategy::Volume);
    }

    #[test]
    fn test_wire_names_round_trip_through_display() {
        for strategy in PricingStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<PricingStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_serde_kebab_case_and_fallback() {
        assert_eq!(
            serde_json::to_string(&PricingStrategy::RiskAverse).unwrap(),
            "\"risk-averse\""
        );
        let parsed: PricingStrategy = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(parsed, PricingStrategy::UnitProfit);
        let parsed: PricingStrategy = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, PricingStrategy::UnitProfit);
    }
}
