use crate::unittype::UnitType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no builder can construct {0}")]
    NotConstructible(UnitType),
}

/// Tuning constants for the construction layer.
///
/// Every field has a default so a config file only needs to list overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForemanConfig {
    /// Geysers closer than this to a ready base count as claimable.
    pub geyser_range: f32,
    /// A refinery closer than this to a geyser already claims it.
    pub refinery_claim_radius: f32,
    /// Ramp depot spots with a depot closer than this are taken.
    pub depot_clearance: f32,
    /// Fallback depots go this far from a base towards the map center.
    pub depot_offset: f32,
    /// Build depots when supply left drops below this.
    pub supply_pressure: u32,
    /// Above this supply cap, depots are built without waiting for pressure.
    pub eager_depot_supply_cap: u32,
    /// Above this supply cap, more depots may be in progress at once.
    pub high_supply_cap: u32,
    pub max_supply: u32,
    pub depot_threshold_low: u32,
    pub depot_threshold_high: u32,
    /// Initial command center quota before any plan raises it.
    pub command_center_target: u32,
}

impl Default for ForemanConfig {
    fn default() -> ForemanConfig {
        ForemanConfig {
            geyser_range: 25.0,
            refinery_claim_radius: 1.0,
            depot_clearance: 1.0,
            depot_offset: 8.0,
            supply_pressure: 5,
            eager_depot_supply_cap: 50,
            high_supply_cap: 100,
            max_supply: 200,
            depot_threshold_low: 1,
            depot_threshold_high: 2,
            command_center_target: 1,
        }
    }
}

impl ForemanConfig {
    pub fn from_json_str(data: &str) -> Result<ForemanConfig, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<ForemanConfig, ConfigError> {
        let data = std::fs::read_to_string(path)?;

        ForemanConfig::from_json_str(&data)
    }

    /// Maximum number of depots allowed in progress at once.
    pub fn depot_threshold(&self, supply_cap: u32) -> u32 {
        if supply_cap > self.high_supply_cap {
            self.depot_threshold_high
        } else {
            self.depot_threshold_low
        }
    }
}
