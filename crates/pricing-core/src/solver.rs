//! # Price Solver
//!
//! Finds the list price that leaves the adjusted profit target after every
//! deduction.
//!
//! ## The Inversion
//! ```text
//! list × net_rate − fixed_fee − effective_cost = adjusted_epu
//!
//! net_rate = 1 − processing_fee_rate − tax_rate − expected_discount_rate
//! list     = (adjusted_epu + effective_cost + fixed_fee) / net_rate
//! ```
//!
//! A solver can only be built for constants with a positive net rate; this
//! is the one fatal configuration error in the pipeline.

use crate::constants::EngineConstants;
use crate::error::{CoreResult, PricingError};
use crate::money::Money;

/// Solves for list prices under a fixed set of fee assumptions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSolver {
    net_rate_bps: u32,
    fixed_processing_fee: Money,
}

impl PriceSolver {
    /// Builds a solver, rejecting constants whose net rate is not positive.
    pub fn new(constants: &EngineConstants) -> CoreResult<Self> {
        let net_rate_bps = constants.net_rate_bps();
        if net_rate_bps <= 0 {
            return Err(PricingError::NonPositiveNetRate {
                net_rate_bps,
                fee_bps: constants.processing_fee_rate.bps(),
                discount_bps: constants.expected_discount_rate.bps(),
                tax_bps: constants.tax_rate.bps(),
            });
        }

        Ok(PriceSolver {
            net_rate_bps: net_rate_bps as u32,
            fixed_processing_fee: constants.fixed_processing_fee,
        })
    }

    /// Fraction of the list price the seller keeps, in (0, 1].
    #[inline]
    pub fn net_rate(&self) -> f64 {
        self.net_rate_bps as f64 / 10_000.0
    }

    /// Flat fee recouped on every sale.
    #[inline]
    pub fn fixed_processing_fee(&self) -> Money {
        self.fixed_processing_fee
    }

    /// Unrounded list price.
    pub fn raw_price(&self, adjusted_epu: f64, effective_cost: Money) -> f64 {
        (adjusted_epu + effective_cost.as_f64() + self.fixed_processing_fee.as_f64()) / self.net_rate()
    }

    /// List price rounded half up to a whole minor unit.
    pub fn solve(&self, adjusted_epu: f64, effective_cost: Money) -> Money {
        Money::round_half_up(self.raw_price(adjusted_epu, effective_cost))
    }
}
