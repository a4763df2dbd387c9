//! # Pegstone Platform
//!
//! The bookkeeping layer around `pegstone-core`: a registry of stablecoin
//! projects, each with its own staking pool, plus k-adjusted mint/burn
//! pricing against injected oracle observations. All chain concerns (token
//! transfers, governance, upgradeability) stay with the external contract
//! layer; this crate holds the local ledger state and the configuration.

pub mod config;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod registry;

pub use config::{EmissionConfig, PlatformConfig, ProjectConfig};
pub use error::{PlatformError, PlatformResult};
pub use ledger::StakingPool;
pub use registry::{Platform, Project};
