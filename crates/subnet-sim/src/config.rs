//! Run-level configuration for a simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use subnet_core::cidr::CidrTier;
use subnet_core::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_connection_range must be positive, got {0}")]
    ConnectionRange(f64),
    #[error("starting_money must be non-negative, got {0}")]
    StartingMoney(f64),
    #[error("raid {field} must be positive, got {value}")]
    RaidTiming { field: &'static str, value: f64 },
    #[error("raid damage must be non-negative, got {0}")]
    RaidDamage(f64),
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Longest connection that can be created.
    pub max_connection_range: f64,
    pub starting_money: f64,
    pub starting_tier: CidrTier,
    /// Automated raids. Off when absent.
    pub raid: Option<RaidConfig>,
}

/// Periodic attacks launched between random tracked nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidConfig {
    pub interval_ms: f64,
    pub damage: f64,
    pub duration_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_connection_range: DEFAULT_MAX_CONNECTION_RANGE,
            starting_money: 0.0,
            starting_tier: CidrTier::default(),
            raid: None,
        }
    }
}

impl Default for RaidConfig {
    fn default() -> Self {
        Self {
            interval_ms: RAID_DEFAULT_INTERVAL_MS,
            damage: RAID_DEFAULT_DAMAGE,
            duration_ms: RAID_DEFAULT_DURATION_MS,
        }
    }
}

impl SimConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.max_connection_range) {
            return Err(ConfigError::ConnectionRange(self.max_connection_range));
        }
        if !non_negative(self.starting_money) {
            return Err(ConfigError::StartingMoney(self.starting_money));
        }
        if let Some(raid) = &self.raid {
            if !positive(raid.interval_ms) {
                return Err(ConfigError::RaidTiming {
                    field: "interval_ms",
                    value: raid.interval_ms,
                });
            }
            if !positive(raid.duration_ms) {
                return Err(ConfigError::RaidTiming {
                    field: "duration_ms",
                    value: raid.duration_ms,
                });
            }
            if !non_negative(raid.damage) {
                return Err(ConfigError::RaidDamage(raid.damage));
            }
        }
        Ok(())
    }
}

// NaN fails both.
fn positive(v: f64) -> bool {
    v > 0.0
}

fn non_negative(v: f64) -> bool {
    v >= 0.0
}
