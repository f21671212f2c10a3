//! Error types for tile maps.

use rift_render::RenderError;
use thiserror::Error;

use crate::layer::{Layer, TileIndex};

/// Errors that can occur while building or drawing a tile map.
#[derive(Debug, Error)]
pub enum MapError {
    /// A test grid was requested before any tile image was loaded.
    #[error("no tile images loaded, cannot generate a test grid")]
    NoTileImages,

    /// A visible cell refers to an image that was never loaded.
    #[error("{layer:?} cell holds tile {index} but only {loaded} images are loaded")]
    MissingImage {
        /// Layer being drawn.
        layer: Layer,
        /// Offending tile index.
        index: TileIndex,
        /// Images loaded for that layer.
        loaded: usize,
    },

    /// Cell coordinates outside the layer.
    #[error("cell ({x}, {y}) is outside the map")]
    CellOutOfBounds {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },

    /// A cell buffer does not match the map's width × height.
    #[error("layer has {actual} cells, expected {expected}")]
    ShapeMismatch {
        /// `width * height`.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },

    /// Surface or image loader failure.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Map description is well-formed TOML but not a usable map.
    #[error("invalid map description: {0}")]
    InvalidDescription(String),

    /// Map description is not valid TOML for the expected shape.
    #[error("map description parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Map description could not be read.
    #[error("map description I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for map operations.
pub type MapResult<T> = Result<T, MapError>;
