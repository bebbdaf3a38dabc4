//=========================================================================
// Game Configuration
//=========================================================================
//
// TOML-backed settings for the window, tick loop, world and states.
//
// Every section and field has a default, so a partial file (or no file
// at all) yields a playable configuration.
//
// Example:
// ```toml
// [window]
// width = 1920
// height = 1080
//
// [timing]
// tps = 120
//
// [bindings]
// pause = ["Escape", "KeyP"]
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::{Action, KeyCode};

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

//=== GameConfig ==========================================================

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub animation: AnimationConfig,
    pub loading: LoadingConfig,
    pub assets: AssetPaths,

    /// Per-action key overrides; unlisted actions keep their defaults.
    pub bindings: HashMap<Action, Vec<KeyCode>>,
}

impl GameConfig {
    /// File picked up from the working directory when no path is given.
    pub const DEFAULT_PATH: &'static str = "tilebound.toml";

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` if given, else [`DEFAULT_PATH`](Self::DEFAULT_PATH) if
    /// it exists, else the defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(Self::DEFAULT_PATH);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.window.width > 0 && self.window.height > 0, "window size must be non-zero"),
            (positive(self.timing.tps), "timing.tps must be positive"),
            (self.timing.channel_capacity > 0, "timing.channel_capacity must be positive"),
            (positive(self.world.tile_size), "world.tile_size must be positive"),
            (self.world.tiles_x > 0 && self.world.tiles_y > 0, "world must have tiles"),
            (
                positive(self.player.width) && positive(self.player.height),
                "player size must be positive",
            ),
            (
                self.player.speed.is_finite() && self.player.speed >= 0.0,
                "player.speed must not be negative",
            ),
            (positive(self.animation.frame_duration), "animation.frame_duration must be positive"),
            (self.animation.frame_count > 0, "animation.frame_count must be positive"),
            (self.animation.scale > 0.0, "animation.scale must be positive"),
            (
                self.loading.complete_delay.is_finite() && self.loading.complete_delay >= 0.0,
                "loading.complete_delay must not be negative",
            ),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(ConfigError::Invalid((*message).to_string())),
            None => Ok(()),
        }
    }
}

/// Finite and above zero.
fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

//=== Sections ============================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical framebuffer size; the window starts at this size.
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tilebound".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Target ticks per second of the core loop.
    pub tps: f64,
    /// Platform → core channel capacity.
    pub channel_capacity: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub tile_size: f64,
    pub tiles_x: usize,
    pub tiles_y: usize,
    /// ASCII map (`#` wall, `.` floor); when absent a walled
    /// `tiles_x` × `tiles_y` room is generated.
    pub map: Option<PathBuf>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            tiles_x: 100,
            tiles_y: 100,
            map: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f64,
    pub start_y: f64,
    pub width: f64,
    pub height: f64,
    /// World units per tick.
    pub speed: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: 1000.0,
            start_y: 1000.0,
            width: 32.0,
            height: 32.0,
            speed: 4.0,
        }
    }
}

/// Idle loop cadence and sprite sheet layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frame_duration: f64,
    pub frame_count: usize,
    pub sheet_start_x: u32,
    pub sheet_start_y: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Horizontal distance between frame origins.
    pub frame_step_x: u32,
    pub scale: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_duration: 0.1,
            frame_count: 9,
            sheet_start_x: 43,
            sheet_start_y: 23,
            frame_width: 11,
            frame_height: 16,
            frame_step_x: 96,
            scale: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Seconds to linger on a full bar before moving on.
    pub complete_delay: f64,
    /// Background pan, pixels per tick.
    pub pan_speed: f64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            complete_delay: 0.5,
            pan_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub logo: PathBuf,
    pub world_background: PathBuf,
    pub player_sheet: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            logo: PathBuf::from("assets/loading_screen/logo.png"),
            world_background: PathBuf::from("assets/world/example.png"),
            player_sheet: PathBuf::from("assets/character/base_idle_strip9.png"),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
