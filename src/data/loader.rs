use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::deck::DECK_SIZE;

/// Pacing delays for scheduled continuations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    pub computer_draw_ms: u64,
    pub computer_play_ms: u64,
    pub battle_start_ms: u64,
    pub battle_apply_ms: u64,
    pub status_animation_ms: u64,
    pub special_animation_ms: u64,
    pub tick_ms: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Delays {
            computer_draw_ms: 1000,
            computer_play_ms: 1500,
            battle_start_ms: 1500,
            battle_apply_ms: 2000,
            status_animation_ms: 1000,
            special_animation_ms: 1500,
            tick_ms: 1000,
        }
    }
}

/// Tunable rules constants. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_health: u32,
    pub starting_health: u32,
    pub max_energy: u32,
    pub starting_energy: u32,
    pub energy_per_draw: u32,
    pub max_power: u32,
    pub power_per_draw: u32,
    pub hand_size: usize,
    pub turn_seconds: u32,
    pub battle_log_capacity: usize,
    pub special_power_damage: u32,
    pub delays: Delays,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_health: 50,
            starting_health: 50,
            max_energy: 10,
            starting_energy: 3,
            energy_per_draw: 1,
            max_power: 100,
            power_per_draw: 10,
            hand_size: 5,
            turn_seconds: 30,
            battle_log_capacity: 8,
            special_power_damage: 10,
            delays: Delays::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "Failed to read {}: {}", path, message),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config JSON: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(data).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_health == 0 || self.starting_health > self.max_health {
            return Err(ConfigError::Invalid(format!(
                "starting_health {} must be within 1..={}",
                self.starting_health, self.max_health
            )));
        }
        if self.starting_energy > self.max_energy {
            return Err(ConfigError::Invalid(format!(
                "starting_energy {} exceeds max_energy {}",
                self.starting_energy, self.max_energy
            )));
        }
        if self.max_power == 0 {
            return Err(ConfigError::Invalid("max_power must be positive".into()));
        }
        if self.energy_per_draw > self.max_energy {
            return Err(ConfigError::Invalid(format!(
                "energy_per_draw {} exceeds max_energy {}",
                self.energy_per_draw, self.max_energy
            )));
        }
        if self.power_per_draw > self.max_power {
            return Err(ConfigError::Invalid(format!(
                "power_per_draw {} exceeds max_power {}",
                self.power_per_draw, self.max_power
            )));
        }
        if self.special_power_damage > self.max_health {
            return Err(ConfigError::Invalid(format!(
                "special_power_damage {} exceeds max_health {}",
                self.special_power_damage, self.max_health
            )));
        }
        if self.battle_log_capacity == 0 {
            return Err(ConfigError::Invalid("battle_log_capacity must be positive".into()));
        }
        if self.turn_seconds == 0 {
            return Err(ConfigError::Invalid("turn_seconds must be positive".into()));
        }
        if self.hand_size > DECK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "hand_size {} exceeds deck size {}",
                self.hand_size, DECK_SIZE
            )));
        }
        if self.delays.tick_ms == 0 {
            return Err(ConfigError::Invalid("delays.tick_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Load a rules configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let config = GameConfig::from_json(&data)?;
    tracing::debug!(path = %path.display(), "loaded game config");
    Ok(config)
}
