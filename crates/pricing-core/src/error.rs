//! # Error Types
//!
//! Domain-specific error types for pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricing-core errors (this file)                                       │
//! │  ├── PricingError     - Engine construction failures                   │
//! │  └── ValidationError  - Input validation failures (form layer)         │
//! │                                                                         │
//! │  pricing-state errors (separate crate)                                 │
//! │  └── StateError       - Config file / env / board failures             │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → StateError → caller            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself never fails: a zero cost yields a zero price and an unknown
//! strategy falls back to the default. Only a broken set of engine constants
//! is an error, and it is reported when the engine is built.

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors raised while building a [`crate::engine::PricingEngine`].
#[derive(Debug, Error)]
pub enum PricingError {
    /// Fees, discount and tax together leave nothing of the list price.
    ///
    /// ## When This Occurs
    /// Only when the constants are edited, e.g. a processing fee of 60% plus
    /// an expected discount of 45%. Solving for a price would divide by zero
    /// or produce a negative price, so the engine refuses to exist.
    #[error("Net rate must be positive, got {net_rate_bps} bps (fee {fee_bps} + discount {discount_bps} + tax {tax_bps})")]
    NonPositiveNetRate {
        net_rate_bps: i64,
        fee_bps: u32,
        discount_bps: u32,
        tax_bps: u32,
    },

    /// A single constant is out of range (wraps ValidationError).
    #[error("Invalid engine constants: {0}")]
    InvalidConstants(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The engine does not re-validate its inputs; these are offered to the form
/// layer and to the config loader.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID, lowercase currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type CoreResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_rate_message() {
        let err = PricingError::NonPositiveNetRate {
            net_rate_bps: -500,
            fee_bps: 6000,
            discount_bps: 4500,
            tax_bps: 0,
        };
        assert_eq!(
            err.to_string(),
            "Net rate must be positive, got -500 bps (fee 6000 + discount 4500 + tax 0)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Negative {
            field: "landed_cost".to_string(),
        };
        assert_eq!(err.to_string(), "landed_cost must not be negative");

        let err = ValidationError::NotAllowed {
            field: "tone".to_string(),
            allowed: vec!["push".to_string(), "normal".to_string()],
        };
        assert_eq!(err.to_string(), "tone must be one of: [\"push\", \"normal\"]");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let validation_err = ValidationError::OutOfRange {
            field: "refund_rate".to_string(),
            min: 0,
            max: 10_000,
        };
        let err: PricingError = validation_err.into();
        assert!(matches!(err, PricingError::InvalidConstants(_)));
    }
}
