//! Platform configuration loaded from TOML.
//!
//! Token amounts are serialized as decimal strings because TOML integers
//! are signed 64-bit and 1e18-scaled values do not fit.

use std::collections::HashSet;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, PlatformResult};

/// Platform configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Assumed per-block variance of the oracle price process
    pub sigma_sq: f64,

    /// Pool emission schedule
    pub emission: EmissionConfig,

    /// Projects opened at startup
    pub projects: Vec<ProjectConfig>,
}

/// Pool-wide emission rate as an exact rational (units per block)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmissionConfig {
    #[serde(with = "amount_serde")]
    pub units_per_block_num: u128,

    #[serde(with = "amount_serde")]
    pub units_per_block_den: u128,
}

/// Configuration for an individual stablecoin project
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Stablecoin name
    pub name: String,

    /// Stablecoin symbol, unique per platform
    pub symbol: String,

    /// Oracle channel the project prices against
    pub channel_id: u32,

    /// Token pair index within the oracle channel
    pub pair_index: u32,

    /// Stable target price in 1e18-scaled units
    #[serde(with = "amount_serde")]
    pub base_price: u128,
}

impl PlatformConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> PlatformResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PlatformError::Io(format!("failed to read config file {}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> PlatformResult<Self> {
        let config: PlatformConfig = toml::from_str(content)
            .map_err(|e| PlatformError::InvalidConfig(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> PlatformResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PlatformError::InvalidConfig(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| PlatformError::Io(format!("failed to write config file {}: {}", path, e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> PlatformResult<()> {
        if !self.sigma_sq.is_finite() || self.sigma_sq <= 0.0 {
            return Err(PlatformError::InvalidConfig(
                "sigma_sq must be a positive finite number".into(),
            ));
        }

        if self.emission.units_per_block_num == 0 || self.emission.units_per_block_den == 0 {
            return Err(PlatformError::InvalidConfig(
                "emission rate terms must be positive".into(),
            ));
        }

        if self.projects.is_empty() {
            return Err(PlatformError::InvalidConfig(
                "at least one project is required".into(),
            ));
        }

        let mut symbols = HashSet::new();
        for project in &self.projects {
            project.validate()?;
            if !symbols.insert(project.symbol.as_str()) {
                return Err(PlatformError::InvalidConfig(format!(
                    "duplicate project symbol: {}",
                    project.symbol
                )));
            }
        }

        Ok(())
    }
}

impl ProjectConfig {
    pub(crate) fn validate(&self) -> PlatformResult<()> {
        if self.name.is_empty() || self.symbol.is_empty() {
            return Err(PlatformError::InvalidConfig(
                "project name and symbol must not be empty".into(),
            ));
        }
        if self.base_price == 0 {
            return Err(PlatformError::InvalidConfig(format!(
                "project {} has zero base price",
                self.symbol
            )));
        }
        Ok(())
    }
}

/// Serialize u128 token amounts as decimal strings
mod amount_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
        sigma_sq = 1.02739726027397e-7

        [emission]
        units_per_block_num = "20000000000000000000000000"
        units_per_block_den = "240000000"

        [[projects]]
        name = "Pegstone BTC Stable"
        symbol = "PBTC"
        channel_id = 0
        pair_index = 2
        base_price = "2000000000000000000000"
    "#;

    #[test]
    fn test_parse_example() {
        let config = PlatformConfig::from_toml(EXAMPLE).unwrap();
        assert_eq!(config.projects.len(), 1);
        assert_eq!(config.projects[0].symbol, "PBTC");
        assert_eq!(
            config.projects[0].base_price,
            2_000_000_000_000_000_000_000
        );
        assert_eq!(
            config.emission.units_per_block_num,
            20_000_000_000_000_000_000_000_000
        );
    }

    #[test]
    fn test_round_trip() {
        let config = PlatformConfig::from_toml(EXAMPLE).unwrap();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let reparsed = PlatformConfig::from_toml(&rendered).unwrap();
        assert_eq!(reparsed.projects[0].base_price, config.projects[0].base_price);
        assert_eq!(reparsed.sigma_sq, config.sigma_sq);
    }

    #[test]
    fn test_rejects_bad_sigma() {
        let bad = EXAMPLE.replace("1.02739726027397e-7", "0.0");
        assert!(PlatformConfig::from_toml(&bad).is_err());
    }

    #[test]
    fn test_rejects_zero_emission() {
        let bad = EXAMPLE.replace("\"240000000\"", "\"0\"");
        assert!(PlatformConfig::from_toml(&bad).is_err());
    }

    #[test]
    fn test_rejects_duplicate_symbols() {
        let dup = format!(
            "{}\n[[projects]]\nname = \"Other\"\nsymbol = \"PBTC\"\nchannel_id = 0\npair_index = 1\nbase_price = \"1000\"\n",
            EXAMPLE
        );
        assert!(PlatformConfig::from_toml(&dup).is_err());
    }

    #[test]
    fn test_rejects_empty_projects() {
        let empty = r#"
            sigma_sq = 1e-7
            projects = []

            [emission]
            units_per_block_num = "1"
            units_per_block_den = "1"
        "#;
        assert!(PlatformConfig::from_toml(empty).is_err());
    }
}
