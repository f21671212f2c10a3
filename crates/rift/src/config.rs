//! # Engine Configuration
//!
//! Startup settings, read once from a TOML file. Every section and field
//! is optional; missing values take the defaults below.
//!
//! ```toml
//! tiles = ["bluetile.png", "browntile.png", "greentile.png"]
//!
//! [window]
//! title = "RIFT"
//! width = 640
//! height = 480
//!
//! [map]
//! kind = "test"      # or kind = "file", path = "maps/basic.toml"
//! seed = 7
//!
//! [player]
//! sprite = "boxy.png"
//! block = [2, 3]
//! speed = 4.0
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};

use rift_core::DEFAULT_BLOCK_SIZE;
use rift_map::TEST_TILE_SIZE;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Root window record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Horizontal screen position.
    pub xpos: i32,
    /// Vertical screen position.
    pub ypos: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "RIFT".to_owned(),
            width: 640,
            height: 480,
            xpos: 100,
            ypos: 100,
        }
    }
}

/// Entity storage settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Entities to reserve room for.
    pub capacity: usize,
    /// Pixels per block.
    pub block_size: u32,
    /// Simulation rate used for integration.
    pub ticks_per_second: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            block_size: DEFAULT_BLOCK_SIZE,
            ticks_per_second: 60,
        }
    }
}

/// Where the tile map comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MapSource {
    /// Random test grid covering the window.
    Test {
        /// Generator seed.
        #[serde(default)]
        seed: u64,
    },
    /// Map description file.
    File {
        /// Path to a TOML map description.
        path: PathBuf,
    },
}

impl Default for MapSource {
    fn default() -> Self {
        Self::Test { seed: 0 }
    }
}

/// The player actor spawned at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite image.
    pub sprite: PathBuf,
    /// Spawn block.
    pub block: [i32; 2],
    /// Spawn offset inside the block, in pixels.
    pub offset: [f32; 2],
    /// Sprite size in pixels.
    pub size: [i32; 2],
    /// Pixels moved per direction event.
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sprite: PathBuf::from("boxy.png"),
            block: [0, 0],
            offset: [0.0, 0.0],
            size: [32, 32],
            speed: 4.0,
        }
    }
}

/// Log filter settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"rift_map=trace"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// Everything the game needs at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base tile images; position is the tile index.
    pub tiles: Vec<PathBuf>,
    /// Decoration images.
    pub decorations: Vec<PathBuf>,
    /// Overlay images.
    pub overlays: Vec<PathBuf>,
    /// Root window.
    pub window: WindowConfig,
    /// Entity storage.
    pub world: WorldConfig,
    /// Tile map source.
    pub map: MapSource,
    /// Player actor.
    pub player: PlayerConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tiles: ["bluetile.png", "browntile.png", "greentile.png"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            decorations: Vec::new(),
            overlays: Vec::new(),
            window: WindowConfig::default(),
            world: WorldConfig::default(),
            map: MapSource::default(),
            player: PlayerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file can't be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks values that parse fine but can't run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} is empty",
                self.window.width, self.window.height
            )));
        }
        if self.world.block_size == 0 {
            return Err(ConfigError::Invalid("block_size must be positive".to_owned()));
        }
        if self.world.ticks_per_second == 0 {
            return Err(ConfigError::Invalid(
                "ticks_per_second must be positive".to_owned(),
            ));
        }
        if matches!(self.map, MapSource::Test { .. }) && self.tiles.is_empty() {
            return Err(ConfigError::Invalid(
                "a test map needs at least one tile image".to_owned(),
            ));
        }
        if !self.player.speed.is_finite() || self.player.speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player speed {} is not a non-negative number",
                self.player.speed
            )));
        }
        Ok(())
    }

    /// Test grid size that fills the window with whole tiles.
    #[must_use]
    pub fn test_grid_size(&self) -> (u32, u32) {
        (
            (self.window.width / TEST_TILE_SIZE).max(1),
            (self.window.height / TEST_TILE_SIZE).max(1),
        )
    }
}
