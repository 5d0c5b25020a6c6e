//! Engine configuration.
//!
//! Loaded from TOML; every section falls back to [`defaults`] for missing keys.
//!
//! # Examples
//!
//! ```
//! use vouch_core::config::VouchConfig;
//!
//! let config = VouchConfig::from_toml("[tiers]\nvesting_epochs = 4\n").unwrap();
//! assert_eq!(config.tiers.vesting_epochs, 4);
//! assert_eq!(config.ring.mrt_max_bypass, 10);
//! ```

pub mod confidence_config;
pub mod defaults;
pub mod observability_config;
pub mod risk_config;
pub mod ring_config;
pub mod stats_config;
pub mod tier_config;

use serde::{Deserialize, Serialize};

pub use confidence_config::ConfidenceConfig;
pub use observability_config::ObservabilityConfig;
pub use risk_config::RiskConfig;
pub use ring_config::RingConfig;
pub use stats_config::StatsConfig;
pub use tier_config::{TierConfig, TierThreshold};

use crate::constants::BPS;
use crate::errors::{VouchError, VouchResult};

/// Top-level configuration aggregating all section configs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VouchConfig {
    pub ring: RingConfig,
    pub stats: StatsConfig,
    pub confidence: ConfidenceConfig,
    pub risk: RiskConfig,
    pub tiers: TierConfig,
    pub observability: ObservabilityConfig,
}

impl VouchConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    /// The result is validated before it is returned.
    pub fn from_toml(s: &str) -> VouchResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| VouchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> VouchResult<String> {
        toml::to_string(self).map_err(|e| VouchError::Config(e.to_string()))
    }

    /// Check every administrative bound. Reports the first offending field.
    pub fn validate(&self) -> VouchResult<()> {
        self.ring.validate()?;
        self.stats.validate()?;
        self.confidence.validate()?;
        self.risk.validate()?;
        self.tiers.validate()?;
        Ok(())
    }
}

pub(crate) fn check_bps(field: &'static str, value: u32) -> VouchResult<()> {
    if value == 0 || value > BPS {
        return Err(VouchError::config_bounds(field, format!("must be in 1..={BPS}")));
    }
    Ok(())
}
