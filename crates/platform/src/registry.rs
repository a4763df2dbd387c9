//! Project registry.
//!
//! A platform holds the opened stablecoin projects. Each project carries
//! its pricing configuration, supply bookkeeping for the stablecoin it
//! issues, and its own staking pool. Oracle observations are injected by
//! the caller on every pricing operation; the registry never reads ambient
//! state.

use log::info;
use pegstone_core::staking::EmissionRate;
use pegstone_core::CoreError;
use pegstone_core::oracle::PricePair;

use crate::config::{PlatformConfig, ProjectConfig};
use crate::error::{PlatformError, PlatformResult};
use crate::ledger::StakingPool;
use crate::pricing::{estimate_burn, estimate_mint};

/// An opened stablecoin project
#[derive(Debug, Clone)]
pub struct Project {
    config: ProjectConfig,
    pool: StakingPool,
    stable_supply: u128,
}

impl Project {
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn pool(&self) -> &StakingPool {
        &self.pool
    }

    pub fn stable_supply(&self) -> u128 {
        self.stable_supply
    }
}

/// The platform: sigma parameter, emission schedule, and opened projects
#[derive(Debug, Clone)]
pub struct Platform {
    sigma_sq: f64,
    rate: EmissionRate,
    projects: Vec<Project>,
}

impl Platform {
    /// Build a platform from validated configuration, opening the
    /// configured projects
    pub fn from_config(config: &PlatformConfig) -> PlatformResult<Self> {
        config.validate()?;
        let rate = EmissionRate::new(
            config.emission.units_per_block_num,
            config.emission.units_per_block_den,
        )?;

        let mut platform = Self {
            sigma_sq: config.sigma_sq,
            rate,
            projects: Vec::new(),
        };
        for project in &config.projects {
            platform.open(project.clone())?;
        }
        Ok(platform)
    }

    /// Open a new project; returns its index
    pub fn open(&mut self, config: ProjectConfig) -> PlatformResult<usize> {
        config.validate()?;
        if self.projects.iter().any(|p| p.config.symbol == config.symbol) {
            return Err(PlatformError::InvalidConfig(format!(
                "duplicate project symbol: {}",
                config.symbol
            )));
        }

        let index = self.projects.len();
        info!(
            "open: index={} symbol={} channel={} pair={}",
            index, config.symbol, config.channel_id, config.pair_index
        );
        self.projects.push(Project {
            config,
            pool: StakingPool::new(self.rate),
            stable_supply: 0,
        });
        Ok(index)
    }

    /// Page through opened projects
    pub fn list(&self, offset: usize, count: usize) -> &[Project] {
        let start = offset.min(self.projects.len());
        let end = offset.saturating_add(count).min(self.projects.len());
        &self.projects[start..end]
    }

    pub fn project(&self, index: usize) -> PlatformResult<&Project> {
        self.projects
            .get(index)
            .ok_or(PlatformError::ProjectNotFound(index))
    }

    fn project_mut(&mut self, index: usize) -> PlatformResult<&mut Project> {
        self.projects
            .get_mut(index)
            .ok_or(PlatformError::ProjectNotFound(index))
    }

    /// Mint stablecoin against `amount` collateral at the k-adjusted price
    pub fn mint(
        &mut self,
        index: usize,
        pair: &PricePair,
        current_block: u64,
        amount: u128,
    ) -> PlatformResult<u128> {
        let sigma_sq = self.sigma_sq;
        let project = self.project_mut(index)?;
        let minted = estimate_mint(
            project.config.base_price,
            sigma_sq,
            pair,
            current_block,
            amount,
        )?;
        project.stable_supply = project
            .stable_supply
            .checked_add(minted)
            .ok_or(CoreError::MathOverflow)?;

        info!(
            "mint: project={} collateral={} minted={} block={}",
            project.config.symbol, amount, minted, current_block
        );
        Ok(minted)
    }

    /// Burn stablecoin and return the collateral value at the k-adjusted
    /// price
    pub fn burn(
        &mut self,
        index: usize,
        pair: &PricePair,
        current_block: u64,
        amount: u128,
    ) -> PlatformResult<u128> {
        let sigma_sq = self.sigma_sq;
        let project = self.project_mut(index)?;
        if amount > project.stable_supply {
            return Err(CoreError::InvalidInput("burn exceeds stable supply").into());
        }
        let returned = estimate_burn(
            project.config.base_price,
            sigma_sq,
            pair,
            current_block,
            amount,
        )?;
        project.stable_supply -= amount;

        info!(
            "burn: project={} burned={} returned={} block={}",
            project.config.symbol, amount, returned, current_block
        );
        Ok(returned)
    }

    /// Mint and immediately stake the minted amount for `account`
    pub fn mint_and_stake(
        &mut self,
        index: usize,
        account: &str,
        pair: &PricePair,
        current_block: u64,
        amount: u128,
    ) -> PlatformResult<u128> {
        let minted = self.mint(index, pair, current_block, amount)?;
        self.project_mut(index)?
            .pool
            .stake(account, minted, current_block)?;
        Ok(minted)
    }

    /// Deposit stablecoin into a project's staking pool
    pub fn stake(
        &mut self,
        index: usize,
        account: &str,
        amount: u128,
        current_block: u64,
    ) -> PlatformResult<()> {
        self.project_mut(index)?.pool.stake(account, amount, current_block)
    }

    /// Reward owed to `account` in a project's pool
    pub fn earned(&self, index: usize, account: &str, current_block: u64) -> PlatformResult<u128> {
        self.project(index)?.pool.earned(account, current_block)
    }

    /// Claim the pending reward, keeping the principal staked
    pub fn claim(
        &mut self,
        index: usize,
        account: &str,
        current_block: u64,
    ) -> PlatformResult<u128> {
        self.project_mut(index)?.pool.claim(account, current_block)
    }

    /// Full exit from a project's pool: `(principal, reward)`
    pub fn withdraw(
        &mut self,
        index: usize,
        account: &str,
        current_block: u64,
    ) -> PlatformResult<(u128, u128)> {
        self.project_mut(index)?.pool.withdraw(account, current_block)
    }
}
