//! # Price Revision Estimator
//!
//! Corrects the most recent oracle price for the blocks elapsed since it was
//! posted. The per-block variance implied by the log return between the two
//! most recent posts is compared against the configured variance; whichever
//! is larger drives the correction, so a quiet market never loosens the
//! stated risk parameter and a volatile one tightens it. The resulting
//! factor `k` always moves the price against the taker: mints pay
//! `price * (1 + k)`, burns receive `price / (1 + k)`.

use crate::constants::REVISION_SCALE;
use crate::errors::{CoreError, CoreResult};
use crate::math::big_int::{mul_div_u128, Rounding};
use crate::math::log_approx::natural_log;
use crate::math::safe_math::safe_add_u128;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Two consecutive oracle price posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PricePair {
    /// Most recent posted price (smallest units)
    pub price: u128,
    /// Block height of the most recent post
    pub block: u64,
    /// Previous posted price (smallest units)
    pub prev_price: u128,
    /// Block height of the previous post
    pub prev_block: u64,
}

impl PricePair {
    /// Create a validated price pair
    pub fn new(price: u128, block: u64, prev_price: u128, prev_block: u64) -> CoreResult<Self> {
        let pair = Self {
            price,
            block,
            prev_price,
            prev_block,
        };
        pair.validate()?;
        Ok(pair)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.price == 0 {
            return Err(CoreError::InvalidInput("price must be positive"));
        }
        if self.prev_price == 0 {
            return Err(CoreError::InvalidInput("previous price must be positive"));
        }
        if self.block < self.prev_block {
            return Err(CoreError::InvalidInput("post block heights not monotonic"));
        }
        Ok(())
    }
}

/// Direction of a trade against the k-adjusted price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum TradeSide {
    /// Collateral in, stablecoin out: pays the inflated price
    Mint,
    /// Stablecoin in, collateral out: receives the deflated price
    Burn,
}

/// Estimate the revision factor `k` for the latest posted price.
///
/// `sigma_sq` is the configured per-block variance of the price process.
/// When the two posts share a block height the implied variance is
/// undefined, and `sigma_sq` alone scales the elapsed interval.
///
/// Returns `k >= 0`; `k == 0` exactly when `current_block == pair.block`.
pub fn estimate_price_revision(
    sigma_sq: f64,
    pair: &PricePair,
    current_block: u64,
) -> CoreResult<f64> {
    if !sigma_sq.is_finite() || sigma_sq <= 0.0 {
        return Err(CoreError::InvalidInput("sigma_sq must be positive"));
    }
    pair.validate()?;
    if current_block < pair.block {
        return Err(CoreError::InvalidInput("current block precedes latest post"));
    }

    let revised_sigma_sq = if pair.block > pair.prev_block {
        let log_return = natural_log(pair.price as f64 / pair.prev_price as f64)?;
        let observed = log_return * log_return / (pair.block - pair.prev_block) as f64;
        if observed > sigma_sq {
            observed
        } else {
            sigma_sq
        }
    } else {
        sigma_sq
    };

    let elapsed = (current_block - pair.block) as f64;
    Ok((revised_sigma_sq * elapsed).sqrt())
}

/// Apply a revision factor to a posted price.
///
/// The factor is bridged into `REVISION_SCALE` fixed point so the adjusted
/// price stays in exact integer arithmetic. Mint rounds up and burn rounds
/// down, keeping both directions taker-penalizing even at the last unit.
pub fn apply_revision(price: u128, k: f64, side: TradeSide) -> CoreResult<u128> {
    if price == 0 {
        return Err(CoreError::InvalidInput("price must be positive"));
    }
    if !k.is_finite() || k < 0.0 {
        return Err(CoreError::InvalidInput(
            "revision factor must be non-negative",
        ));
    }

    // Saturating float-to-int cast; an out-of-range factor surfaces as
    // MathOverflow in the addition below rather than wrapping
    let k_scaled = (k * REVISION_SCALE as f64) as u128;
    let one_plus_k = safe_add_u128(REVISION_SCALE, k_scaled)?;

    match side {
        TradeSide::Mint => mul_div_u128(price, one_plus_k, REVISION_SCALE, Rounding::Up),
        TradeSide::Burn => mul_div_u128(price, REVISION_SCALE, one_plus_k, Rounding::Down),
    }
}
