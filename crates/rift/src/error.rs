//! Error types for the game crate.

use rift_core::WorldError;
use rift_map::MapError;
use rift_render::RenderError;
use thiserror::Error;

/// Errors while loading or checking an [`crate::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for the expected shape.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but a value is unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by [`crate::Game`].
#[derive(Debug, Error)]
pub enum GameError {
    /// Startup configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// World mutation or notification failed.
    #[error(transparent)]
    World(#[from] WorldError),

    /// Image loading, projection or surface failure.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Tile map failure.
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
