//! # pricing-core: Dynamic Pricing for the Storefront
//!
//! Given a seller's landed cost, a pricing strategy and a tone, this crate
//! recommends a list price and explains how it got there. It is the only
//! place prices are derived: live repricing on cost change, initial product
//! creation and the "why this price" view all call into it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Product form (variant cost / strategy / tone)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ triggers                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              pricing-state (PriceBoard, config)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   cost ──► strategy ──► tone ──► solver     breakdown  recalc  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOCKS • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type in minor units
//! - [`types`] - Rate, Price, Variant
//! - [`constants`] - Engine assumptions (fees, refund costs, strategy targets)
//! - [`cost`] - Landed cost → effective cost
//! - [`strategy`] - Pricing strategies and their profit targets
//! - [`tone`] - Push / normal / ease multipliers
//! - [`solver`] - Fee-netting price solve
//! - [`engine`] - The pipeline end to end
//! - [`breakdown`] - Step-by-step price explanations
//! - [`recalc`] - When to rewrite a stored price
//! - [`validation`] - Strict checks for the form layer
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pricing_core::{Money, PricingEngine, PricingStrategy, Tone};
//!
//! let engine = PricingEngine::standard().unwrap();
//!
//! // $10.00 landed, flat $6.00 profit target
//! let result = engine.compute_price(Money::from_cents(1000), PricingStrategy::UnitProfit, Tone::Normal);
//! assert_eq!(result.effective_cost.cents(), 1054);
//! assert_eq!(result.final_price.cents(), 1828);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod breakdown;
pub mod constants;
pub mod cost;
pub mod engine;
pub mod error;
pub mod money;
pub mod recalc;
pub mod solver;
pub mod strategy;
pub mod tone;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use breakdown::{BreakdownStep, PriceExplanation, PriceTotals, StepKind};
pub use constants::{EngineConstants, StrategyCoefficients};
pub use engine::{PricingEngine, PricingResult, PricingTrace};
pub use error::{CoreResult, PricingError, ValidationError};
pub use money::Money;
pub use recalc::{RecalcOutcome, RecalcTrigger, RecalculationPolicy};
pub use strategy::PricingStrategy;
pub use tone::Tone;
pub use types::{Price, Rate, Variant};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest stock-on-hand quantity the form layer accepts for one variant.
pub const MAX_STOCK_QUANTITY: i64 = 1_000_000;

/// Largest landed cost the form layer accepts, in minor units ($1 billion).
pub const MAX_LANDED_COST: i64 = 100_000_000_000;
