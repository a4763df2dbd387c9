//! Mint/burn estimation at the k-adjusted oracle price.
//!
//! The collateral price is first revised for staleness, then the exchange
//! value is computed in exact integer arithmetic against the project's
//! stable target price. Both directions round in the pool's favor.

use pegstone_core::math::{mul_div_u128, Rounding};
use pegstone_core::oracle::{apply_revision, estimate_price_revision, PricePair, TradeSide};

use crate::error::PlatformResult;

/// Stablecoin amount minted for `amount` collateral:
/// `amount * base_price / (price * (1 + k))`
pub fn estimate_mint(
    base_price: u128,
    sigma_sq: f64,
    pair: &PricePair,
    current_block: u64,
    amount: u128,
) -> PlatformResult<u128> {
    let k = estimate_price_revision(sigma_sq, pair, current_block)?;
    let adjusted = apply_revision(pair.price, k, TradeSide::Mint)?;
    Ok(mul_div_u128(amount, base_price, adjusted, Rounding::Down)?)
}

/// Collateral amount returned for burning `amount` stablecoin:
/// `amount * (price / (1 + k)) / base_price`
pub fn estimate_burn(
    base_price: u128,
    sigma_sq: f64,
    pair: &PricePair,
    current_block: u64,
    amount: u128,
) -> PlatformResult<u128> {
    let k = estimate_price_revision(sigma_sq, pair, current_block)?;
    let adjusted = apply_revision(pair.price, k, TradeSide::Burn)?;
    Ok(mul_div_u128(amount, adjusted, base_price, Rounding::Down)?)
}
