//! Runtime game configuration loaded from `rocket.toml`.
//!
//! Every field defaults to the matching compile-time value in
//! [`crate::constants`], so a TOML file only needs the keys it changes:
//!
//! ```toml
//! asteroid_count = 40
//! game_time = 90.0
//! aggregation = "average"
//! ```

use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::constants::*;
use crate::error::GameError;
use crate::input::Aggregation;

pub const DEFAULT_CONFIG_PATH: &str = "rocket.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Scenario
    pub asteroid_count: usize,
    pub resource_count: usize,
    pub game_time: f64,
    pub time_step: f64,

    // Playfield
    pub width: f64,
    pub height: f64,
    pub margin: f64,

    // Speeds
    pub max_asteroid_speed: f64,
    pub max_resource_speed: f64,
    pub max_rocket_speed: f64,

    // Footprints
    pub rocket_size: f64,
    pub asteroid_size: f64,
    pub resource_size: f64,

    // Input
    pub max_deflection: i32,
    pub aggregation: Aggregation,

    // Placement and penalties
    pub respawn_inset: f64,
    pub start_clearance: f64,
    pub max_placement_attempts: u32,
    pub collision_penalty: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            asteroid_count: ASTEROID_COUNT,
            resource_count: RESOURCE_COUNT,
            game_time: GAME_TIME,
            time_step: TIME_STEP,
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            margin: WRAP_MARGIN,
            max_asteroid_speed: MAX_ASTEROID_SPEED,
            max_resource_speed: MAX_RESOURCE_SPEED,
            max_rocket_speed: MAX_ROCKET_SPEED,
            rocket_size: ROCKET_SIZE,
            asteroid_size: ASTEROID_SIZE,
            resource_size: RESOURCE_SIZE,
            max_deflection: MAX_DEFLECTION,
            aggregation: Aggregation::default(),
            respawn_inset: RESPAWN_INSET,
            start_clearance: START_CLEARANCE,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            collision_penalty: COLLISION_PENALTY,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, GameError> {
        let config = toml::from_str::<GameConfig>(contents).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate().map_err(|message| GameError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(config)
    }

    /// Rejects values the simulation cannot sample from or step with.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("margin", self.margin),
            ("time_step", self.time_step),
            ("game_time", self.game_time),
            ("rocket_size", self.rocket_size),
            ("asteroid_size", self.asteroid_size),
            ("resource_size", self.resource_size),
        ];
        // Written as !(v > 0) so NaN is rejected too.
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(format!("{} must be positive, got {}", name, value));
        }
        if self.max_deflection < 0 {
            return Err(format!("max_deflection must not be negative, got {}", self.max_deflection));
        }
        if !(self.collision_penalty >= 0.0) {
            return Err(format!("collision_penalty must not be negative, got {}", self.collision_penalty));
        }
        Ok(())
    }

    /// Loads an explicitly requested file. Any failure is fatal.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `rocket.toml` from the working directory if it exists.
    ///
    /// A missing file is normal. A malformed one is logged and ignored.
    pub fn load_default() -> Self {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents, path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("{}; using defaults", e);
                    GameConfig::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No {} found; using compiled defaults", DEFAULT_CONFIG_PATH);
                GameConfig::default()
            }
            Err(e) => {
                warn!("Failed to read {}: {}; using defaults", DEFAULT_CONFIG_PATH, e);
                GameConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = GameConfig::from_toml_str("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.width, 900.0);
        assert_eq!(config.margin, 35.0);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let toml = "asteroid_count = 40\ngame_time = 90.0\naggregation = \"average\"\n";
        let config = GameConfig::from_toml_str(toml, Path::new("partial.toml")).unwrap();
        assert_eq!(config.asteroid_count, 40);
        assert_eq!(config.game_time, 90.0);
        assert_eq!(config.aggregation, Aggregation::Average);
        assert_eq!(config.resource_count, RESOURCE_COUNT);
    }

    #[test]
    fn malformed_file_names_the_path() {
        let err = GameConfig::from_toml_str("width = \"wide\"", Path::new("bad.toml")).unwrap_err();
        match err {
            GameError::Config { path, .. } => assert_eq!(path, Path::new("bad.toml")),
            other => panic!("unexpected error: {}", other),
        }
    }

    fn rejected(toml: &str) -> String {
        match GameConfig::from_toml_str(toml, Path::new("rocket.toml")) {
            Err(GameError::Config { message, .. }) => message,
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("'{}' should have been rejected", toml),
        }
    }

    #[test]
    fn negative_deflection_is_rejected() {
        assert!(rejected("max_deflection = -1").contains("max_deflection"));
    }

    #[test]
    fn zero_deflection_is_allowed() {
        let config = GameConfig::from_toml_str("max_deflection = 0", Path::new("rocket.toml")).unwrap();
        assert_eq!(config.max_deflection, 0);
    }

    #[test]
    fn non_positive_playfield_is_rejected() {
        assert!(rejected("width = -10.0").contains("width"));
        assert!(rejected("width = 0.0").contains("width"));
        assert!(rejected("height = -600.0").contains("height"));
    }

    #[test]
    fn non_positive_step_margin_and_clock_are_rejected() {
        assert!(rejected("time_step = 0.0").contains("time_step"));
        assert!(rejected("margin = -35.0").contains("margin"));
        assert!(rejected("game_time = 0.0").contains("game_time"));
        assert!(rejected("time_step = nan").contains("time_step"));
    }

    #[test]
    fn non_positive_footprints_are_rejected() {
        assert!(rejected("rocket_size = 0.0").contains("rocket_size"));
        assert!(rejected("asteroid_size = -1.0").contains("asteroid_size"));
        assert!(rejected("resource_size = 0.0").contains("resource_size"));
    }

    #[test]
    fn negative_penalty_is_rejected() {
        assert!(rejected("collision_penalty = -2.0").contains("collision_penalty"));
    }

    #[test]
    fn defaults_pass_validation() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(GameConfig::load(Path::new("definitely/not/here.toml")).is_err());
    }
}
