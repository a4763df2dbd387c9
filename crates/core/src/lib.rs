//! # Pegstone Core
//!
//! Pure numerical logic shared by the Pegstone platform components:
//!
//! - Price revision estimation for stale-oracle protection in mint/burn pricing
//! - Linear pro-rata reward accrual and the stake-position state machine
//! - Checked integer arithmetic with 256-bit intermediates for token amounts
//!
//! Everything in this crate is a pure function of its arguments; there is no
//! ambient state, I/O, or clock access.
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization for off-chain use

pub mod constants;
pub mod errors;
pub mod math;
pub mod oracle;
pub mod staking;

pub use constants::*;
pub use errors::{CoreError, CoreResult};
