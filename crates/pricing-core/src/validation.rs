//! # Validation Module
//!
//! Input validation utilities for callers of the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront form                                              │
//! │  ├── Field shapes, required fields                                     │
//! │  └── THIS MODULE: strict strategy/tone names, non-negative amounts     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine construction                                          │
//! │  └── THIS MODULE: every rate within 0..=10000 bps                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing                                                      │
//! │  └── No validation; lenient fallbacks only                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::validation::{validate_landed_cost, validate_strategy};
//! use pricing_core::Money;
//!
//! validate_landed_cost(Money::from_cents(1000)).unwrap();
//! assert!(validate_strategy("premuim").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::strategy::PricingStrategy;
use crate::tone::Tone;
use crate::types::Rate;
use crate::{MAX_LANDED_COST, MAX_STOCK_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a landed cost. Zero is allowed and prices to zero.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed MAX_LANDED_COST
pub fn validate_landed_cost(cost: Money) -> ValidationResult<()> {
    validate_non_negative("landed_cost", cost)?;
    if cost.cents() > MAX_LANDED_COST {
        return Err(ValidationError::OutOfRange {
            field: "landed_cost".to_string(),
            min: 0,
            max: MAX_LANDED_COST,
        });
    }
    Ok(())
}

/// Validates that an amount is not negative.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.cents() < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a stock-on-hand quantity.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed MAX_STOCK_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "qty_soh".to_string(),
            min: 0,
            max: MAX_STOCK_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a rate in basis points (0% to 100%).
///
/// ## Example
/// ```rust
/// use pricing_core::validation::validate_rate_bps;
/// use pricing_core::types::Rate;
///
/// assert!(validate_rate_bps("processing_fee_rate", Rate::from_bps(290)).is_ok());
/// assert!(validate_rate_bps("processing_fee_rate", Rate::from_bps(10_001)).is_err());
/// ```
pub fn validate_rate_bps(field: &str, rate: Rate) -> ValidationResult<()> {
    if rate.bps() > Rate::ONE.bps() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: Rate::ONE.bps() as i64,
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an ISO 4217 currency code (three uppercase ASCII letters).
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a three-letter ISO 4217 code".to_string(),
        });
    }

    Ok(())
}

/// Validates a variant id (UUID).
pub fn validate_variant_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Strictly parses a strategy name; unknown names are an error here.
pub fn validate_strategy(name: &str) -> ValidationResult<PricingStrategy> {
    name.parse()
}

/// Strictly parses a tone name; unknown names are an error here.
pub fn validate_tone(name: &str) -> ValidationResult<Tone> {
    name.parse()
}

// =============================================================================
// Unit Tests
// =============================================================================
