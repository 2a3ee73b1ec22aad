//! Tunable economy and kennel parameters.
//!
//! Every field has a default, so a JSON file only needs the values it
//! overrides:
//!
//! ```
//! use celedog_logic::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "economy": { "startingGold": 250 } }"#).unwrap();
//! assert_eq!(config.economy.starting_gold, 250);
//! assert_eq!(config.economy.breeding_base_cost, 100);
//! assert_eq!(config.kennel.default_capacity, 10);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EconomyConfig {
    pub starting_gold: u64,
    pub breeding_base_cost: u64,
    /// Indexed by `floor(mean parent rarity) - 1`.
    pub rarity_multipliers: [f64; 5],
    /// Cost grows by this fraction per mean parent generation.
    pub generation_bonus: f64,
    /// Price of each successive kennel expansion.
    pub kennel_expansion_costs: Vec<u64>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_gold: 1_000,
            breeding_base_cost: 100,
            rarity_multipliers: [1.0, 2.0, 5.0, 10.0, 20.0],
            generation_bonus: 0.15,
            kennel_expansion_costs: vec![1_000, 2_500, 5_000, 10_000],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KennelConfig {
    pub default_capacity: usize,
    pub max_capacity: usize,
    pub slots_per_expansion: usize,
}

impl Default for KennelConfig {
    fn default() -> Self {
        Self {
            default_capacity: 10,
            max_capacity: 50,
            slots_per_expansion: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub economy: EconomyConfig,
    pub kennel: KennelConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kennel.default_capacity == 0 {
            return Err(ConfigError::Invalid(
                "default kennel capacity must be positive".into(),
            ));
        }
        if self.kennel.max_capacity < self.kennel.default_capacity {
            return Err(ConfigError::Invalid(format!(
                "max capacity {} is below default capacity {}",
                self.kennel.max_capacity, self.kennel.default_capacity
            )));
        }
        if self.economy.generation_bonus < 0.0
            || self.economy.rarity_multipliers.iter().any(|m| *m < 0.0)
        {
            return Err(ConfigError::Invalid(
                "cost multipliers must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipping_balance() {
        let config = GameConfig::default();
        assert_eq!(config.economy.starting_gold, 1_000);
        assert_eq!(config.economy.rarity_multipliers, [1.0, 2.0, 5.0, 10.0, 20.0]);
        assert_eq!(config.economy.kennel_expansion_costs.len(), 4);
        assert_eq!(config.kennel.max_capacity, 50);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(GameConfig::from_json_str("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_inverted_capacity() {
        let err = GameConfig::from_json_str(
            r#"{ "kennel": { "defaultCapacity": 20, "maxCapacity": 10 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            GameConfig::from_json_str("{ economy"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            GameConfig::load("/nonexistent/celedog.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
