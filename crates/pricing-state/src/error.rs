//! # State Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       State Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Engine      │  │        Board            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigLoad     │  │  Pricing        │  │  VariantNotFound        │ │
//! │  │  ConfigSave     │  │  Validation     │  │  DuplicateVariant       │ │
//! │  │  InvalidConfig  │  │                 │  │  LockPoisoned           │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pricing_core::{PricingError, ValidationError};
use thiserror::Error;

/// Result type alias for state operations.
pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Config parsed but holds an unusable value.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// The configured constants cannot build an engine.
    #[error("Pricing engine error: {0}")]
    Pricing(#[from] PricingError),

    /// Input rejected before it reached the engine.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Board Errors
    // =========================================================================
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    #[error("Variant already on the board: {0}")]
    DuplicateVariant(String),

    /// A thread panicked while holding a board lock.
    #[error("Price board lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<std::io::Error> for StateError {
    fn from(err: std::io::Error) -> Self {
        StateError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StateError {
    fn from(err: toml::de::Error) -> Self {
        StateError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StateError {
    fn from(err: toml::ser::Error) -> Self {
        StateError::ConfigSaveFailed(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StateError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        StateError::LockPoisoned(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_wraps() {
        let err: StateError = PricingError::NonPositiveNetRate {
            net_rate_bps: 0,
            fee_bps: 5000,
            discount_bps: 5000,
            tax_bps: 0,
        }
        .into();
        assert!(matches!(err, StateError::Pricing(_)));
        assert!(err.to_string().starts_with("Pricing engine error: Net rate must be positive"));
    }

    #[test]
    fn test_toml_error_is_load_failure() {
        let err: StateError = toml::from_str::<toml::Table>("engine = [").unwrap_err().into();
        assert!(matches!(err, StateError::ConfigLoadFailed(_)));
    }
}
