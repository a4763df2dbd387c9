//! # Linear Reward Accrual
//!
//! Reward owed to a staker over an accrual span:
//!
//! ```text
//! reward = principal * elapsed * rate / total_staked
//! ```
//!
//! computed through a 256-bit intermediate so token-scale principals never
//! overflow, truncating only at the smallest token unit.

use crate::errors::{CoreError, CoreResult};
use crate::math::big_int::{mul_div_u128, Rounding};
use crate::math::safe_math::safe_mul_u128;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Pool-wide emission rate in reward units per block, as an exact rational.
///
/// The rational form matters: reference deployments quote rates like
/// `20 / 2_400_000 / 100` per staked unit, which has no integer
/// representation in smallest units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct EmissionRate {
    num: u128,
    den: u128,
}

impl EmissionRate {
    /// Create a validated emission rate of `num / den` units per block
    pub fn new(num: u128, den: u128) -> CoreResult<Self> {
        if num == 0 {
            return Err(CoreError::InvalidInput("emission rate must be positive"));
        }
        if den == 0 {
            return Err(CoreError::InvalidInput(
                "emission rate denominator must be positive",
            ));
        }
        Ok(Self { num, den })
    }

    pub fn numerator(&self) -> u128 {
        self.num
    }

    pub fn denominator(&self) -> u128 {
        self.den
    }
}

/// Reward earned by `principal` out of `total_staked` over `elapsed_blocks`.
///
/// A zero pool total yields zero without dividing. A principal exceeding the
/// pool total is a caller-input bug and fails with `InvalidInput`. The
/// result is linear in `elapsed_blocks` and idempotent: the read path
/// mutates nothing.
pub fn accrue_reward(
    principal: u128,
    total_staked: u128,
    elapsed_blocks: u64,
    rate: EmissionRate,
) -> CoreResult<u128> {
    if total_staked == 0 {
        return Ok(0);
    }
    if principal > total_staked {
        return Err(CoreError::InvalidInput("principal exceeds pool total"));
    }
    if principal == 0 || elapsed_blocks == 0 {
        return Ok(0);
    }

    let staked_blocks = safe_mul_u128(principal, elapsed_blocks as u128)?;
    let scaled_total = safe_mul_u128(total_staked, rate.den)?;
    mul_div_u128(staked_blocks, rate.num, scaled_total, Rounding::Down)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WHOLE_POOL: u128 = 1_000_000_000_000_000_000_000_000; // 1e24

    /// Reference rate: 20 / 2_400_000 / 100 units per block per 1e24 staked
    fn reference_rate() -> EmissionRate {
        EmissionRate::new(WHOLE_POOL * 20, 240_000_000).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        // Staker owns the whole pool; 12 blocks yield exactly 1e18 units
        let reward = accrue_reward(WHOLE_POOL, WHOLE_POOL, 12, reference_rate()).unwrap();
        assert_eq!(reward, 1_000_000_000_000_000_000);

        // One more block: floor(13e24 / 12e6)
        let reward = accrue_reward(WHOLE_POOL, WHOLE_POOL, 13, reference_rate()).unwrap();
        assert_eq!(reward, 1_083_333_333_333_333_333);
    }

    #[test]
    fn test_zero_cases() {
        let rate = reference_rate();
        assert_eq!(accrue_reward(0, WHOLE_POOL, 100, rate).unwrap(), 0);
        assert_eq!(accrue_reward(WHOLE_POOL, WHOLE_POOL, 0, rate).unwrap(), 0);
        // Empty pool short-circuits before any division
        assert_eq!(accrue_reward(0, 0, 100, rate).unwrap(), 0);
    }

    #[test]
    fn test_principal_above_total_rejected() {
        assert_eq!(
            accrue_reward(WHOLE_POOL, WHOLE_POOL - 1, 1, reference_rate()),
            Err(CoreError::InvalidInput("principal exceeds pool total"))
        );
    }

    #[test]
    fn test_half_share() {
        // Half the pool earns half the emission
        let rate = EmissionRate::new(1_000, 1).unwrap();
        let reward = accrue_reward(500, 1_000, 7, rate).unwrap();
        assert_eq!(reward, 3_500);
    }

    #[test]
    fn test_rate_validation() {
        assert!(EmissionRate::new(0, 1).is_err());
        assert!(EmissionRate::new(1, 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_linear_in_elapsed(
            principal in 1u128..=1_000_000_000_000u128,
            num in 1u128..=1_000_000u128,
            elapsed in 0u64..=1_000_000u64,
        ) {
            // With the staker owning the pool and an integer rate, the
            // reward is exactly elapsed * num, so doubling elapsed doubles it
            let rate = EmissionRate::new(num, 1).unwrap();
            let single = accrue_reward(principal, principal, elapsed, rate).unwrap();
            let double = accrue_reward(principal, principal, elapsed * 2, rate).unwrap();
            prop_assert_eq!(single, elapsed as u128 * num);
            prop_assert_eq!(double, 2 * single);
        }

        #[test]
        fn prop_monotone_in_elapsed(
            principal in 1u128..=1_000_000_000u128,
            extra in 0u128..=1_000_000_000u128,
            num in 1u128..=1_000_000u128,
            den in 1u128..=1_000_000u128,
            elapsed in 0u64..1_000_000u64,
        ) {
            let total = principal + extra;
            let rate = EmissionRate::new(num, den).unwrap();
            let before = accrue_reward(principal, total, elapsed, rate).unwrap();
            let after = accrue_reward(principal, total, elapsed + 1, rate).unwrap();
            prop_assert!(after >= before);
        }

        #[test]
        fn prop_segmented_accrual_bounds(
            principal in 1u128..=1_000_000_000u128,
            extra in 0u128..=1_000_000_000u128,
            num in 1u128..=1_000_000u128,
            den in 1u128..=1_000_000u128,
            n1 in 0u64..=100_000u64,
            n2 in 0u64..=100_000u64,
        ) {
            // Truncation happens once per segment, so a split span can trail
            // the single span by at most one smallest unit and never leads it
            let total = principal + extra;
            let rate = EmissionRate::new(num, den).unwrap();
            let split = accrue_reward(principal, total, n1, rate).unwrap()
                + accrue_reward(principal, total, n2, rate).unwrap();
            let whole = accrue_reward(principal, total, n1 + n2, rate).unwrap();
            prop_assert!(split <= whole);
            prop_assert!(whole - split <= 1);
        }

        #[test]
        fn prop_segmented_accrual_exact_when_divisible(
            principal in 1u128..=1_000_000_000_000u128,
            num in 1u128..=1_000_000u128,
            n1 in 0u64..=1_000_000u64,
            n2 in 0u64..=1_000_000u64,
        ) {
            // Whole-pool staker with an integer rate: no truncation, so
            // sequential accrual equals the single span exactly
            let rate = EmissionRate::new(num, 1).unwrap();
            let split = accrue_reward(principal, principal, n1, rate).unwrap()
                + accrue_reward(principal, principal, n2, rate).unwrap();
            let whole = accrue_reward(principal, principal, n1 + n2, rate).unwrap();
            prop_assert_eq!(split, whole);
        }
    }
}
