use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::map::MAX_DIMENSION;
use crate::units::{Fps, Tile};

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV_VAR: &str = "CAVERN_CONFIG";
/// Config file read when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/cavern.toml";
/// Fastest tick rate that still yields a whole-millisecond step.
pub const MAX_TICK_RATE_HZ: u32 = 1000;

/// Top-level runtime configuration, loaded from `cavern.toml`.
///
/// Physics tuning is not configurable; movement constants live next to the
/// integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CavernConfig {
    pub screen: ScreenConfig,
    pub graphics: GraphicsConfig,
    pub tick_rate_hz: u32,
}

impl Default for CavernConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            graphics: GraphicsConfig::default(),
            tick_rate_hz: 60,
        }
    }
}

/// Visible play area in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: Tile,
    pub height: Tile,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: Tile(20),
            height: Tile(15),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    pub quality: GraphicsQuality,
}

/// Sprite sheet resolution, which fixes the world-to-pixel scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsQuality {
    /// 16 px tiles.
    Original,
    /// 32 px tiles.
    #[default]
    High,
}

impl GraphicsQuality {
    pub fn game_units_per_pixel(self) -> f64 {
        match self {
            GraphicsQuality::Original => 2.0,
            GraphicsQuality::High => 1.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    /// Parsed, but a value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse(e) => write!(f, "invalid config: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl CavernConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Screen sides must lie in `1..=MAX_DIMENSION` tiles and the tick rate
    /// in `1..=MAX_TICK_RATE_HZ`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sides = [
            ("screen.width", self.screen.width),
            ("screen.height", self.screen.height),
        ];
        for (name, side) in sides {
            if side < Tile(1) || side > MAX_DIMENSION {
                return Err(ConfigError::Invalid(format!(
                    "{name} = {} is outside 1..={}",
                    side.0, MAX_DIMENSION.0
                )));
            }
        }
        if !(1..=MAX_TICK_RATE_HZ).contains(&self.tick_rate_hz) {
            return Err(ConfigError::Invalid(format!(
                "tick_rate_hz = {} is outside 1..={MAX_TICK_RATE_HZ}",
                self.tick_rate_hz
            )));
        }
        Ok(())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load config from `$CAVERN_CONFIG` or `config/cavern.toml`. Falls back to
    /// defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let explicit = std::env::var(CONFIG_ENV_VAR).ok();
        let path = explicit
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        match Self::from_path(&path) {
            Ok(cfg) => {
                tracing::debug!("Loaded config from {path}");
                cfg
            },
            Err(ConfigError::Io { .. }) if explicit.is_none() => Self::default(),
            Err(e) => {
                tracing::warn!("{e}, using defaults");
                Self::default()
            },
        }
    }

    pub fn tick_rate(&self) -> Fps {
        Fps(self.tick_rate_hz)
    }

    /// Fixed logical step handed to every simulation update.
    pub fn tick_duration(&self) -> Duration {
        self.tick_rate().frame_time()
    }
}
