//! # Staking Module
//!
//! Linear pro-rata reward accrual and the stake-position state machine.
//! Accrual is a pure function of principal, pool total, elapsed blocks, and
//! the pool emission rate; positions only change state at explicit
//! checkpoints (deposit, claim, withdraw).

pub mod accrual;
pub mod position;

pub use accrual::*;
pub use position::*;
