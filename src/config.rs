//! Run configuration.
//!
//! Settings load from `assets/config.ron`. Every field has a stock value,
//! so a partial file only overrides what it names and a missing file is
//! not an error.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "assets/config.ron";

/// Validation limits for user-supplied settings
pub mod limits {
    /// Smallest usable window edge
    pub const MIN_WINDOW: i32 = 320;
    /// Largest particle pool a config may ask for
    pub const MAX_POOL: usize = 100_000;
    /// Largest per-tick spawn count
    pub const MAX_SPAWN_RATE: usize = 1_000;
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub particles: ParticleConfig,
    pub scroll: ScrollConfig,
    pub player: PlayerConfig,
    pub effects: EffectConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    /// Native frame cap. `None` leaves vsync in charge.
    pub fps_cap: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Slots per system. Fixed for the whole run.
    pub pool: usize,
    /// Slots offered to each system's spawn strategy per tick.
    pub spawn_rate: usize,
}

/// Scroll factors for the scenery layers. The play layer is pinned at 1.0
/// so the helicopter stays glued to its screen anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub far: f32,
    pub near: f32,
    pub foreground: f32,
}

/// Which toggleable effects start enabled. Grass has no entry here; it is
/// gated on altitude alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub fire: bool,
    pub rain: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub start_y: f32,
    /// Steering speed in units per second.
    pub speed: f32,
    /// Constant forward drift added on top of steering.
    pub drift: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
    /// Flying at or below this height kicks up grass.
    pub grass_line: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            particles: ParticleConfig::default(),
            scroll: ScrollConfig::default(),
            player: PlayerConfig::default(),
            effects: EffectConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps_cap: None,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            pool: 1000,
            spawn_rate: 4,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            far: 0.1,
            near: 0.4,
            foreground: 1.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: 200.0,
            start_y: 320.0,
            speed: 260.0,
            drift: 90.0,
            min_altitude: 80.0,
            max_altitude: 620.0,
            grass_line: 500.0,
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            fire: true,
            rain: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Config = ron::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// A missing file means stock settings. Anything else is reported and
    /// also falls back rather than refusing to start.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                eprintln!("Continuing with default settings");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width < limits::MIN_WINDOW || self.window.height < limits::MIN_WINDOW {
            return Err(ConfigError::ValidationError(format!(
                "window {}x{} is below the {}px minimum",
                self.window.width,
                self.window.height,
                limits::MIN_WINDOW
            )));
        }
        if self.window.fps_cap == Some(0) {
            return Err(ConfigError::ValidationError(
                "fps cap must be at least 1".to_string(),
            ));
        }
        if self.particles.pool == 0 || self.particles.pool > limits::MAX_POOL {
            return Err(ConfigError::ValidationError(format!(
                "particle pool must be between 1 and {} (got {})",
                limits::MAX_POOL,
                self.particles.pool
            )));
        }
        if self.particles.spawn_rate > limits::MAX_SPAWN_RATE {
            return Err(ConfigError::ValidationError(format!(
                "spawn rate too high ({} > {})",
                self.particles.spawn_rate,
                limits::MAX_SPAWN_RATE
            )));
        }
        for (name, factor) in [
            ("far", self.scroll.far),
            ("near", self.scroll.near),
            ("foreground", self.scroll.foreground),
        ] {
            if !factor.is_finite() || factor < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "scroll factor '{}' must be finite and non-negative (got {})",
                    name, factor
                )));
            }
        }
        for (name, value) in [
            ("start_x", self.player.start_x),
            ("start_y", self.player.start_y),
            ("drift", self.player.drift),
            ("min_altitude", self.player.min_altitude),
            ("max_altitude", self.player.max_altitude),
            ("grass_line", self.player.grass_line),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "player setting '{}' must be finite (got {})",
                    name, value
                )));
            }
        }
        if self.player.min_altitude >= self.player.max_altitude {
            return Err(ConfigError::ValidationError(format!(
                "altitude band is empty ({} >= {})",
                self.player.min_altitude, self.player.max_altitude
            )));
        }
        if !self.player.speed.is_finite() || self.player.speed <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "player speed must be positive (got {})",
                self.player.speed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("nope.ron"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.ron");
        fs::write(&path, "(particles: (pool: 64), scroll: (near: 0.5))").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.particles.pool, 64);
        assert_eq!(config.particles.spawn_rate, 4);
        assert_eq!(config.scroll.near, 0.5);
        assert_eq!(config.scroll.far, 0.1);
        assert_eq!(config.window.width, 1280);
        assert!(config.effects.fire);
    }

    #[test]
    fn test_config_round_trips_through_ron() {
        let mut config = Config::default();
        config.window.fps_cap = Some(120);
        config.particles.pool = 512;
        config.effects.rain = false;

        let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
        let text = ron::ser::to_string_pretty(&config, pretty).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.ron");
        fs::write(&path, text).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_unparseable_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.ron");
        fs::write(&path, "{ definitely not ron }").unwrap();

        match Config::load(&path) {
            Err(ConfigError::ParseError(_)) => {}
            other => panic!("expected a parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_zero_pool_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.ron");
        fs::write(&path, "(particles: (pool: 0))").unwrap();

        match Config::load(&path) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("pool"), "unexpected message: {msg}")
            }
            other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_zero_fps_cap_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.ron");
        fs::write(&path, "(window: (fps_cap: Some(0)))").unwrap();

        // An accepted zero would turn the frame-cap wait into an
        // unbounded spin; it has to die here instead.
        match Config::load(&path) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("fps cap"), "unexpected message: {msg}")
            }
            other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
        }
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_non_finite_player_settings_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.ron");

        // NaN slips past every ordering comparison, so the band check
        // alone would let it through to the altitude clamp.
        fs::write(&path, "(player: (min_altitude: NaN))").unwrap();
        match Config::load(&path) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("min_altitude"), "unexpected message: {msg}")
            }
            other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
        }
        assert_eq!(Config::load_or_default(&path), Config::default());

        fs::write(&path, "(player: (grass_line: inf))").unwrap();
        match Config::load(&path) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("grass_line"), "unexpected message: {msg}")
            }
            other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_bad_file_still_starts_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.ron");
        fs::write(&path, "(scroll: (far: -2.0))").unwrap();
        assert_eq!(Config::load_or_default(&path), Config::default());
    }
}
