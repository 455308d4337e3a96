//! # pricing-state: Configuration and Shared Variant State
//!
//! Everything around the pricing engine that touches the environment:
//! reading the deployment's assumptions and holding variants that many
//! callers reprice at once.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          pricing-state                                  │
//! │                                                                         │
//! │   pricing.toml ─┐                                                       │
//! │                 ├──► PricingConfig ──► PricingEngine ──┐                │
//! │   STOREFRONT_* ─┘        (config)        (pricing-core) │                │
//! │                                                         ▼                │
//! │   trigger(id, change) ───────────────────────────► PriceBoard           │
//! │                                                    (board)              │
//! │                                                    ├── Arc<Mutex<V>>    │
//! │                                                    │   per variant      │
//! │                                                    └── write log        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use pricing_core::{Money, PricingStrategy, RecalcTrigger, Tone};
//! use pricing_state::{PriceBoard, PricingConfig};
//!
//! let board = PriceBoard::from_config(&PricingConfig::default()).unwrap();
//! let variant = board
//!     .create(Money::from_cents(1000), PricingStrategy::UnitProfit, Tone::Normal, 10)
//!     .unwrap();
//! assert_eq!(variant.default_price.amount.cents(), 1828);
//!
//! let outcome = board.trigger(&variant.id, RecalcTrigger::ToneChanged(Tone::Push)).unwrap();
//! assert_eq!(outcome.price().amount.cents(), 1894);
//! ```

pub mod board;
pub mod config;
pub mod error;

pub use board::{PriceBoard, PriceWrite};
pub use config::{BoardSettings, PricingConfig, CONFIG_PATH_ENV};
pub use error::{StateError, StateResult};
