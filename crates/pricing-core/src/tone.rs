//! # Tone Adjuster
//!
//! Scales the strategy's profit target by the seller's chosen tone.
//!
//! | Tone   | Multiplier |
//! |--------|------------|
//! | push   | ×1.10      |
//! | normal | ×1.00      |
//! | ease   | ×0.90      |

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::Rate;

/// Seller-facing aggressiveness dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Push,
    #[default]
    Normal,
    Ease,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Push, Tone::Normal, Tone::Ease];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Tone::Push => "push",
            Tone::Normal => "normal",
            Tone::Ease => "ease",
        }
    }

    /// Multiplier applied to the target EPU.
    pub const fn multiplier(&self) -> Rate {
        match self {
            Tone::Push => Rate::from_bps(11_000),
            Tone::Normal => Rate::ONE,
            Tone::Ease => Rate::from_bps(9_000),
        }
    }

    /// Adjusted EPU for a strategy's target EPU.
    #[inline]
    pub fn adjust(&self, target_epu: f64) -> f64 {
        self.multiplier().of(target_epu)
    }

    /// Parses a tone name, falling back to `normal` when unknown.
    pub fn from_str_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Seller-facing reason for the tone, shown in explanations.
    pub const fn rationale(&self) -> &'static str {
        match self {
            Tone::Push => "Push asks 10% more profit per unit, for items that sell on their own.",
            Tone::Normal => "Normal takes the strategy's profit target as is.",
            Tone::Ease => "Ease gives up 10% of the profit target to make the price gentler.",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "push" => Ok(Tone::Push),
            "normal" => Ok(Tone::Normal),
            "ease" => Ok(Tone::Ease),
            _ => Err(ValidationError::NotAllowed {
                field: "tone".to_string(),
                allowed: Self::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Tone::from_str_lossy).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust() {
        assert_eq!(Tone::Push.adjust(600.0), 660.0);
        assert_eq!(Tone::Normal.adjust(600.0), 600.0);
        assert_eq!(Tone::Ease.adjust(600.0), 540.0);
    }

    #[test]
    fn test_ordering_holds_for_fractional_targets() {
        let target = 1643.2;
        assert!(Tone::Ease.adjust(target) <= Tone::Normal.adjust(target));
        assert!(Tone::Normal.adjust(target) <= Tone::Push.adjust(target));
    }

    #[test]
    fn test_parsing() {
        assert_eq!("PUSH".parse::<Tone>().unwrap(), Tone::Push);
        assert!("loud".parse::<Tone>().is_err());
        assert_eq!(Tone::from_str_lossy("loud"), Tone::Normal);
        let parsed: Tone = serde_json::from_str("\"ease\"").unwrap();
        assert_eq!(parsed, Tone::Ease);
        let parsed: Tone = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Tone::Normal);
    }
}
