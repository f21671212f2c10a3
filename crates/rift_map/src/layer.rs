//! # Tile Layers
//!
//! A layer is one `width × height` array of [`TileIndex`] values stored
//! row-major in a single buffer:
//!
//! ```text
//! cell(x, y) = cells[x + y * width]
//! ```
//!
//! Every map has three same-shaped layers, drawn in [`Layer::ALL`] order.

use crate::error::{MapError, MapResult};

/// Key into a layer's image table.
pub type TileIndex = u32;

/// Marker for a cell that draws nothing.
pub const NO_TILE: TileIndex = TileIndex::MAX;

/// Which of the three layers of a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Base terrain. Every cell is expected to hold a tile.
    Tiles,
    /// Props drawn over the terrain.
    Decorations,
    /// Topmost layer, drawn after entities.
    Overlays,
}

impl Layer {
    /// All layers in conventional draw order.
    pub const ALL: [Self; 3] = [Self::Tiles, Self::Decorations, Self::Overlays];

    /// Position of this layer in per-layer arrays.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            Self::Tiles => 0,
            Self::Decorations => 1,
            Self::Overlays => 2,
        }
    }
}

/// A flat 2D array of tile indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileLayer {
    cells: Vec<TileIndex>,
    width: u32,
    height: u32,
}

impl TileLayer {
    /// Creates a layer with every cell set to `fill`.
    #[must_use]
    pub fn filled(width: u32, height: u32, fill: TileIndex) -> Self {
        tracing::trace!(width, height, fill, "tile layer created");
        Self {
            cells: vec![fill; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Creates a layer with no tiles.
    #[must_use]
    pub fn empty(width: u32, height: u32) -> Self {
        Self::filled(width, height, NO_TILE)
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ShapeMismatch`] if `cells.len() != width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<TileIndex>) -> MapResult<Self> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(MapError::ShapeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Buffer index of a cell, or `None` outside the layer.
    #[inline]
    #[must_use]
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x as usize + y as usize * self.width as usize)
    }

    /// Tile at a cell.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<TileIndex> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Stores a tile at a cell.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CellOutOfBounds`] outside the layer.
    pub fn set(&mut self, x: u32, y: u32, tile: TileIndex) -> MapResult<()> {
        let i = self.index(x, y).ok_or(MapError::CellOutOfBounds { x, y })?;
        self.cells[i] = tile;
        Ok(())
    }

    /// One row of cells.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[TileIndex]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[TileIndex] {
        &self.cells
    }

    /// Mutable access to all cells, row-major.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [TileIndex] {
        &mut self.cells
    }

    /// Width in cells (the stride).
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}
