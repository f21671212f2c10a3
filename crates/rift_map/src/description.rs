//! # Map Descriptions
//!
//! The parsed form of a map file. Cells are written row-major; a negative
//! value marks a cell with no tile.
//!
//! ```toml
//! width = 3
//! height = 2
//! tilewidth = 32
//! tileheight = 32
//! tiles = [0, 1, 1,
//!          2, 0, 1]
//! decorations = [-1, 4, -1,
//!                -1, -1, -1]
//! ```
//!
//! `decorations` and `overlays` may be omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};
use crate::layer::{TileIndex, TileLayer, NO_TILE};

/// Largest map side in pixels; screen coordinates are `i32`.
pub const MAX_MAP_PIXELS: u64 = i32::MAX as u64;

/// A map as supplied by a map file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDescription {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Tile width in pixels.
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    /// Tile height in pixels.
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    /// Base layer cells.
    pub tiles: Vec<i64>,
    /// Decoration layer cells.
    #[serde(default)]
    pub decorations: Vec<i64>,
    /// Overlay layer cells.
    #[serde(default)]
    pub overlays: Vec<i64>,
}

impl MapDescription {
    /// Parses and validates a description.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Parse`] for malformed TOML and
    /// [`MapError::InvalidDescription`] / [`MapError::ShapeMismatch`] for
    /// a map that cannot be built.
    pub fn from_toml_str(source: &str) -> MapResult<Self> {
        let description: Self = toml::from_str(source)?;
        description.validate()?;
        Ok(description)
    }

    /// Reads, parses and validates a map file.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Io`] if the file can't be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> MapResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading map description");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks sizes and cell counts.
    ///
    /// # Errors
    ///
    /// See [`from_toml_str`](Self::from_toml_str).
    pub fn validate(&self) -> MapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidDescription(format!(
                "map size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(MapError::InvalidDescription(format!(
                "tile size {}x{} is empty",
                self.tile_width, self.tile_height
            )));
        }
        let pixels_x = u64::from(self.width) * u64::from(self.tile_width);
        let pixels_y = u64::from(self.height) * u64::from(self.tile_height);
        if pixels_x > MAX_MAP_PIXELS || pixels_y > MAX_MAP_PIXELS {
            return Err(MapError::InvalidDescription(format!(
                "map is {pixels_x}x{pixels_y} pixels, limit is {MAX_MAP_PIXELS} per axis"
            )));
        }

        let expected = self.cell_count();
        if self.tiles.len() != expected {
            return Err(MapError::ShapeMismatch {
                expected,
                actual: self.tiles.len(),
            });
        }
        for optional in [&self.decorations, &self.overlays] {
            if !optional.is_empty() && optional.len() != expected {
                return Err(MapError::ShapeMismatch {
                    expected,
                    actual: optional.len(),
                });
            }
        }
        Ok(())
    }

    fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Builds the three layers: tiles, decorations, overlays.
    ///
    /// Omitted layers come back empty.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ShapeMismatch`] if a cell list has the wrong length.
    pub fn layers(&self) -> MapResult<[TileLayer; 3]> {
        Ok([
            self.layer(&self.tiles)?,
            self.layer(&self.decorations)?,
            self.layer(&self.overlays)?,
        ])
    }

    fn layer(&self, cells: &[i64]) -> MapResult<TileLayer> {
        if cells.is_empty() {
            return Ok(TileLayer::empty(self.width, self.height));
        }
        let cells = cells.iter().map(|&c| to_tile(c)).collect();
        TileLayer::from_cells(self.width, self.height, cells)
    }
}

/// Negative and oversized values both mean "no tile".
fn to_tile(cell: i64) -> TileIndex {
    TileIndex::try_from(cell).unwrap_or(NO_TILE)
}
