//! # Stake Position State Machine
//!
//! A position is either `Empty` (no principal, no pending reward) or
//! `Staked`. Deposits move `Empty -> Staked` or keep `Staked -> Staked`;
//! claims keep `Staked -> Staked`; a withdrawal is always a full exit back
//! to `Empty`. Every transition first flushes the reward accrued since the
//! last checkpoint into the pending balance and re-bases the checkpoint to
//! the current block, so accrual is never lost or double counted.

use crate::errors::{CoreError, CoreResult};
use crate::math::safe_math::safe_add_u128;
use crate::staking::accrual::{accrue_reward, EmissionRate};

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// A single account's claim on a staking pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct StakePosition {
    /// Staked principal in smallest units
    principal: u128,
    /// Block height at which the accrual clock was last reset
    checkpoint_block: u64,
    /// Reward flushed but not yet claimed
    pending_reward: u128,
}

impl StakePosition {
    /// A position with no principal and no pending reward
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.principal == 0 && self.pending_reward == 0
    }

    pub fn principal(&self) -> u128 {
        self.principal
    }

    pub fn checkpoint_block(&self) -> u64 {
        self.checkpoint_block
    }

    /// Total reward owed as of `current_block`: pending plus the accrual
    /// since the last checkpoint. Read-only; calling it twice for the same
    /// inputs yields the same result.
    pub fn earned(
        &self,
        total_staked: u128,
        rate: EmissionRate,
        current_block: u64,
    ) -> CoreResult<u128> {
        if self.is_empty() {
            return Err(CoreError::NoPosition);
        }
        let elapsed = self.elapsed(current_block)?;
        let accrued = accrue_reward(self.principal, total_staked, elapsed, rate)?;
        safe_add_u128(self.pending_reward, accrued)
    }

    /// Add principal. Valid from both states; flushes accrual at the
    /// pre-deposit pool total before the principal changes.
    pub fn deposit(
        &mut self,
        amount: u128,
        total_staked: u128,
        rate: EmissionRate,
        current_block: u64,
    ) -> CoreResult<()> {
        if amount == 0 {
            return Err(CoreError::InvalidInput("deposit amount must be positive"));
        }
        self.settle(total_staked, rate, current_block)?;
        self.principal = safe_add_u128(self.principal, amount)?;
        Ok(())
    }

    /// Flush and take the pending reward, keeping the principal staked
    pub fn claim(
        &mut self,
        total_staked: u128,
        rate: EmissionRate,
        current_block: u64,
    ) -> CoreResult<u128> {
        if self.is_empty() {
            return Err(CoreError::NoPosition);
        }
        self.settle(total_staked, rate, current_block)?;
        let reward = self.pending_reward;
        self.pending_reward = 0;
        Ok(reward)
    }

    /// Full exit: returns `(principal, reward)` and zeroes the position
    pub fn withdraw(
        &mut self,
        total_staked: u128,
        rate: EmissionRate,
        current_block: u64,
    ) -> CoreResult<(u128, u128)> {
        if self.is_empty() {
            return Err(CoreError::NoPosition);
        }
        self.settle(total_staked, rate, current_block)?;
        let principal = self.principal;
        let reward = self.pending_reward;
        *self = Self::empty();
        Ok((principal, reward))
    }

    /// Flush accrued reward into the pending balance and re-base the
    /// checkpoint. Safe to call repeatedly at the same block. Pool-level
    /// ledgers call this on every open position before the pool total
    /// changes.
    pub fn settle(
        &mut self,
        total_staked: u128,
        rate: EmissionRate,
        current_block: u64,
    ) -> CoreResult<()> {
        let elapsed = self.elapsed(current_block)?;
        let accrued = accrue_reward(self.principal, total_staked, elapsed, rate)?;
        self.pending_reward = safe_add_u128(self.pending_reward, accrued)?;
        self.checkpoint_block = current_block;
        Ok(())
    }

    fn elapsed(&self, current_block: u64) -> CoreResult<u64> {
        if current_block < self.checkpoint_block {
            return Err(CoreError::InvalidInput("block height went backwards"));
        }
        Ok(current_block - self.checkpoint_block)
    }
}
