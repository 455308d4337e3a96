//! # Pricing Configuration
//!
//! Loads the engine's assumptions for a deployment.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_PROCESSING_FEE_BPS=290                                  │
//! │     STOREFRONT_DEFAULT_CURRENCY=USD                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $STOREFRONT_PRICING_CONFIG, or                                     │
//! │     ~/.config/storefront/pricing.toml (Linux)                          │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     EngineConstants::STANDARD, USD                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [engine]
//! refund_rate = 800              # bps
//! processing_fee_rate = 290      # bps
//! fixed_processing_fee = 30      # minor units
//! expected_discount_rate = 500   # bps
//!
//! [engine.strategy]
//! unit_profit_epu = 600
//! premium_markup = 8000
//!
//! [board]
//! default_currency = "USD"
//! ```
//!
//! Every key is optional; omitted keys keep their standard value.

use pricing_core::validation::validate_currency_code;
use pricing_core::{EngineConstants, Money, PricingEngine, Rate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StateError, StateResult};

/// Env var naming an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_PRICING_CONFIG";

// =============================================================================
// Board Settings
// =============================================================================

/// Settings for the shared price board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Currency given to variants created without a price.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Number of price writes kept in the board's log (oldest dropped first).
    #[serde(default = "default_write_log_capacity")]
    pub write_log_capacity: usize,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_write_log_capacity() -> usize {
    1000
}

impl BoardSettings {
    /// Checks the currency code and that the write log can hold an entry.
    pub fn validate(&self) -> StateResult<()> {
        validate_currency_code(&self.default_currency)?;

        if self.write_log_capacity == 0 {
            return Err(StateError::InvalidConfig(
                "write_log_capacity must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            default_currency: default_currency(),
            write_log_capacity: default_write_log_capacity(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Engine assumptions.
    #[serde(default)]
    pub engine: EngineConstants,

    /// Price board settings.
    #[serde(default)]
    pub board: BoardSettings,
}

impl PricingConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StateResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Pricing config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StateResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StateError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StateError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StateError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the configuration by building an engine from it.
    pub fn validate(&self) -> StateResult<()> {
        self.build_engine()?;
        self.board.validate()
    }

    /// Builds the pricing engine these constants describe.
    pub fn build_engine(&self) -> StateResult<PricingEngine> {
        Ok(PricingEngine::new(self.engine)?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup; unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let rate = |key: &str| {
            let raw = lookup(key)?;
            match raw.trim().parse::<u32>() {
                Ok(bps) => {
                    debug!(key, bps, "Overriding rate from environment");
                    Some(Rate::from_bps(bps))
                }
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring non-numeric rate override");
                    None
                }
            }
        };
        let amount = |key: &str| {
            let raw = lookup(key)?;
            match raw.trim().parse::<i64>() {
                Ok(cents) => {
                    debug!(key, cents, "Overriding amount from environment");
                    Some(Money::from_cents(cents))
                }
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring non-numeric amount override");
                    None
                }
            }
        };

        if let Some(r) = rate("STOREFRONT_REFUND_RATE_BPS") {
            self.engine.refund_rate = r;
        }
        if let Some(r) = rate("STOREFRONT_PROCESSING_FEE_BPS") {
            self.engine.processing_fee_rate = r;
        }
        if let Some(r) = rate("STOREFRONT_EXPECTED_DISCOUNT_BPS") {
            self.engine.expected_discount_rate = r;
        }
        if let Some(a) = amount("STOREFRONT_FIXED_PROCESSING_FEE") {
            self.engine.fixed_processing_fee = a;
        }
        if let Some(a) = amount("STOREFRONT_RETURN_SHIPPING_COST") {
            self.engine.return_shipping_cost = a;
        }

        if let Some(currency) = lookup("STOREFRONT_DEFAULT_CURRENCY") {
            debug!(currency = %currency, "Overriding default currency from environment");
            self.board.default_currency = currency.trim().to_uppercase();
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("pricing.toml"))
    }
}
