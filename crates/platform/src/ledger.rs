//! Multi-account staking ledger.
//!
//! Wraps `StakePosition` per account and keeps the pool total. The pure
//! accrual formula is only valid over a span where the pool total was
//! constant, so every mutation that changes the total first settles all
//! open positions at the pre-change total. Reads mutate nothing.

use std::collections::HashMap;

use log::{debug, info};
use pegstone_core::staking::{EmissionRate, StakePosition};
use pegstone_core::CoreError;

use crate::error::PlatformResult;

/// A project's staking pool
#[derive(Debug, Clone)]
pub struct StakingPool {
    rate: EmissionRate,
    total_staked: u128,
    positions: HashMap<String, StakePosition>,
    /// Highest block height any operation has seen
    last_block: u64,
}

impl StakingPool {
    pub fn new(rate: EmissionRate) -> Self {
        Self {
            rate,
            total_staked: 0,
            positions: HashMap::new(),
            last_block: 0,
        }
    }

    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    pub fn rate(&self) -> EmissionRate {
        self.rate
    }

    /// Deposit principal for `account`. Settles every open position at the
    /// pre-deposit total before the pool share changes.
    pub fn stake(&mut self, account: &str, amount: u128, current_block: u64) -> PlatformResult<()> {
        if amount == 0 {
            return Err(CoreError::InvalidInput("stake amount must be positive").into());
        }
        self.advance_block(current_block)?;
        self.settle_all(current_block)?;

        let position = self.positions.entry(account.to_string()).or_default();
        position.deposit(amount, self.total_staked, self.rate, current_block)?;
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(CoreError::MathOverflow)?;

        info!(
            "stake: account={} amount={} total_staked={} block={}",
            account, amount, self.total_staked, current_block
        );
        Ok(())
    }

    /// Reward owed to `account` as of `current_block`
    pub fn earned(&self, account: &str, current_block: u64) -> PlatformResult<u128> {
        let position = self.positions.get(account).ok_or(CoreError::NoPosition)?;
        Ok(position.earned(self.total_staked, self.rate, current_block)?)
    }

    /// Flush and pay out the pending reward, keeping the principal staked
    pub fn claim(&mut self, account: &str, current_block: u64) -> PlatformResult<u128> {
        self.advance_block(current_block)?;
        let total_staked = self.total_staked;
        let rate = self.rate;
        let position = self
            .positions
            .get_mut(account)
            .ok_or(CoreError::NoPosition)?;
        let reward = position.claim(total_staked, rate, current_block)?;

        info!(
            "claim: account={} reward={} block={}",
            account, reward, current_block
        );
        Ok(reward)
    }

    /// Full exit: returns `(principal, reward)` and removes the position
    pub fn withdraw(&mut self, account: &str, current_block: u64) -> PlatformResult<(u128, u128)> {
        self.advance_block(current_block)?;
        self.settle_all(current_block)?;

        let total_staked = self.total_staked;
        let rate = self.rate;
        let position = self
            .positions
            .get_mut(account)
            .ok_or(CoreError::NoPosition)?;
        let (principal, reward) = position.withdraw(total_staked, rate, current_block)?;
        self.positions.remove(account);
        self.total_staked -= principal;

        info!(
            "withdraw: account={} principal={} reward={} total_staked={} block={}",
            account, principal, reward, self.total_staked, current_block
        );
        Ok((principal, reward))
    }

    /// Flush accrual for every open position at the current pool total
    fn settle_all(&mut self, current_block: u64) -> PlatformResult<()> {
        let total_staked = self.total_staked;
        let rate = self.rate;
        for (account, position) in self.positions.iter_mut() {
            position.settle(total_staked, rate, current_block)?;
            debug!("settle: account={} block={}", account, current_block);
        }
        Ok(())
    }

    fn advance_block(&mut self, current_block: u64) -> PlatformResult<()> {
        if current_block < self.last_block {
            return Err(CoreError::InvalidInput("block height went backwards").into());
        }
        self.last_block = current_block;
        Ok(())
    }
}
