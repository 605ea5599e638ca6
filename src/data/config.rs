use std::fmt;
use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::simulation::economy::Money;

/// Stat drain per decay tick, in stat points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecayRates {
    pub hunger: f32,
    pub energy: f32,
    pub hygiene: f32,
    pub happiness: f32,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            hunger: 0.8,
            energy: 0.5,
            hygiene: 0.6,
            happiness: 0.5,
        }
    }
}

/// Session tunables. Every field falls back to the shipped default when
/// absent from the config file; money amounts are in cents.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub decay: DecayRates,
    pub savings_goal: Money,
    pub salary: Money,
    pub kibble_price: Money,
    pub ball_price: Money,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            decay: DecayRates::default(),
            savings_goal: Money::from_dollars(500),
            salary: Money::from_dollars(50),
            kibble_price: Money::from_dollars(10),
            ball_price: Money::from_dollars(25),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "failed to read {}: {}", path, source),
            ConfigError::Json { path, source } => write!(f, "failed to parse {}: {}", path, source),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.savings_goal, Money::from_dollars(500));
        assert_eq!(config.salary, Money::from_dollars(50));
        assert!((config.decay.hunger - 0.8).abs() < f32::EPSILON);
        assert!((config.decay.happiness - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"salary": 7500}"#).unwrap();
        assert_eq!(config.salary, Money::from_cents(7500));
        assert_eq!(config.savings_goal, Money::from_dollars(500));
    }
}
