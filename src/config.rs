//! Game configuration, loaded from an optional TOML file.
//!
//! Every field has a default so a partial file only needs the values it
//! changes. The path comes from `SHURIKEN_STORM_CONFIG`; without it the
//! built-in defaults are used.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::compute::player_start;
use crate::geometry::{fully_in_bounds, Playfield};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SHURIKEN_STORM_CONFIG";

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value that parsed but makes no sense
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// What happens to the player's speed when the boost key is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostMode {
    /// Speed drops back to base on release.
    Momentary,
    /// Once boosted, speed stays boosted.
    Sticky,
}

/// Gameplay constants threaded through the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub initial_life: u32,
    pub base_speed: f32,
    pub boost_speed: f32,
    pub boost_mode: BoostMode,
    pub invulnerable_ticks: i32,
    /// Tick counter increment per frame.
    pub tick_step: u64,
    pub enemy_spawn_period: u64,
    pub enemy_descent_speed: f32,
    pub hold_altitude_min: f32,
    pub bomb_interval_min: u64,
    pub bomb_interval_max: u64,
    pub bomb_radius_min: u32,
    pub bomb_radius_max: u32,
    pub bomb_speed: f32,
    pub shuriken_speed: f32,
    pub enemy_score: u32,
    pub bomb_score: u32,
    pub enemy_explosion_life: i32,
    pub bomb_explosion_life: i32,
    /// Flash left when a hazard touches an invulnerable player.
    pub contact_explosion_life: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_life: 10,
            base_speed: 10.0,
            boost_speed: 20.0,
            boost_mode: BoostMode::Momentary,
            invulnerable_ticks: 20,
            tick_step: 10,
            enemy_spawn_period: 2000,
            enemy_descent_speed: 6.0,
            hold_altitude_min: 50.0,
            bomb_interval_min: 50,
            bomb_interval_max: 300,
            bomb_radius_min: 10,
            bomb_radius_max: 50,
            bomb_speed: 6.0,
            shuriken_speed: 20.0,
            enemy_score: 10,
            bomb_score: 1,
            enemy_explosion_life: 100,
            bomb_explosion_life: 50,
            contact_explosion_life: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self { width: 1600.0, height: 900.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub frames_per_second: u32,
    /// Real-time hold on the defeat frame before the session ends.
    pub defeat_pause_ms: u64,
    /// Background scroll in world units per frame.
    pub background_scroll: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 50,
            defeat_pause_ms: 2000,
            background_scroll: 10,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub timing: TimingConfig,
    pub rules: Rules,
    /// Glyph overrides keyed by sprite name.
    pub sprites: HashMap<String, String>,
}

impl GameConfig {
    /// Load from `SHURIKEN_STORM_CONFIG` if set, otherwise defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.playfield.width,
            height: self.playfield.height,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason: reason.to_string() })
        };
        let r = &self.rules;

        if !(self.playfield.width > 0.0 && self.playfield.height > 0.0) {
            return invalid("playfield", "width and height must be positive");
        }
        let field = self.playfield();
        if !fully_in_bounds(&player_start(&field), &field) {
            return invalid("playfield", "too small to hold the player at its start position");
        }
        if self.timing.frames_per_second == 0 {
            return invalid("timing.frames_per_second", "must be at least 1");
        }
        if r.initial_life == 0 {
            return invalid("rules.initial_life", "must be at least 1");
        }
        if r.tick_step == 0 || r.enemy_spawn_period == 0 {
            return invalid("rules.tick_step", "tick step and spawn period must be non-zero");
        }
        if r.bomb_interval_min == 0 || r.bomb_interval_min > r.bomb_interval_max {
            return invalid("rules.bomb_interval_min", "need 0 < min <= max");
        }
        if r.bomb_radius_min == 0 || r.bomb_radius_min > r.bomb_radius_max {
            return invalid("rules.bomb_radius_min", "need 0 < min <= max");
        }
        if r.hold_altitude_min > self.playfield.height / 2.0 {
            return invalid("rules.hold_altitude_min", "must not exceed half the playfield height");
        }
        if r.base_speed <= 0.0 || r.boost_speed < r.base_speed {
            return invalid("rules.boost_speed", "need 0 < base_speed <= boost_speed");
        }
        if r.enemy_descent_speed <= 0.0 {
            return invalid("rules.enemy_descent_speed", "must be positive");
        }
        if r.bomb_speed <= 0.0 || r.shuriken_speed <= 0.0 {
            return invalid("rules.bomb_speed", "bomb and shuriken speeds must be positive");
        }
        if r.invulnerable_ticks < 0 {
            return invalid("rules.invulnerable_ticks", "must not be negative");
        }
        if self.sprites.values().any(|glyph| glyph.trim().is_empty()) {
            return invalid("sprites", "glyph overrides must not be blank");
        }
        Ok(())
    }
}
