//! # Tile Grid
//!
//! Three same-shaped [`TileLayer`]s, one image table per layer, and the
//! [`Viewport`] that picks which cells reach the screen.
//!
//! ## Drawing
//!
//! For every cell of the display rectangle:
//!
//! ```text
//! world cell = screen cell + offset
//! dest       = (screen_x * tile_w, screen_y * tile_h, tile_w, tile_h)
//! src        = (0, 0, tile_w, tile_h)
//! ```
//!
//! Cells holding [`NO_TILE`] are skipped. A cell whose index has no loaded
//! image fails the whole draw before anything is blitted.

use std::path::Path;

use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rift_render::{ImageHandle, ImageLoader, ImageTable, Rect, Surface};

use crate::description::MapDescription;
use crate::error::{MapError, MapResult};
use crate::layer::{Layer, TileIndex, TileLayer, NO_TILE};
use crate::viewport::Viewport;

/// Tile size used by generated test grids, in pixels.
pub const TEST_TILE_SIZE: u32 = 32;

/// A tile map with its viewport and per-layer images.
#[derive(Clone, Debug, Default)]
pub struct TileGrid {
    viewport: Viewport,
    tile_width: u32,
    tile_height: u32,
    layers: [TileLayer; 3],
    images: [ImageTable; 3],
}

impl TileGrid {
    /// Creates an empty 0×0 grid with no images.
    #[must_use]
    pub fn new() -> Self {
        tracing::trace!("tile grid created");
        Self::default()
    }

    /// Builds a grid from a parsed map description.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDescription`] or [`MapError::ShapeMismatch`]
    /// if the description is unusable.
    pub fn from_description(description: &MapDescription) -> MapResult<Self> {
        let mut grid = Self::new();
        grid.load_description(description)?;
        Ok(grid)
    }

    /// Replaces size and cells with those of `description`.
    ///
    /// Loaded images are kept. The viewport is reset to show the whole map.
    ///
    /// # Errors
    ///
    /// As [`from_description`](Self::from_description). The grid is left
    /// untouched on failure.
    pub fn load_description(&mut self, description: &MapDescription) -> MapResult<()> {
        description.validate()?;
        let layers = description.layers()?;

        self.layers = layers;
        self.tile_width = description.tile_width;
        self.tile_height = description.tile_height;
        self.viewport = Viewport::new(description.width, description.height);

        tracing::debug!(
            width = description.width,
            height = description.height,
            tile_width = self.tile_width,
            tile_height = self.tile_height,
            "map loaded"
        );
        Ok(())
    }

    /// Loads base tile images. Position in `paths` becomes the [`TileIndex`].
    ///
    /// Returns the number of tile images now loaded.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Render`] if the loader rejects a path.
    pub fn load_tile_images<L, P>(&mut self, loader: &mut L, paths: &[P]) -> MapResult<usize>
    where
        L: ImageLoader + ?Sized,
        P: AsRef<Path>,
    {
        self.load_layer_images(Layer::Tiles, loader, paths)
    }

    /// Loads images for any layer, appending to what it already has.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Render`] if the loader rejects a path.
    pub fn load_layer_images<L, P>(
        &mut self,
        layer: Layer,
        loader: &mut L,
        paths: &[P],
    ) -> MapResult<usize>
    where
        L: ImageLoader + ?Sized,
        P: AsRef<Path>,
    {
        let count = self.images[layer.slot()].load_all(loader, paths)?;
        tracing::debug!(?layer, count, "layer images loaded");
        Ok(count)
    }

    /// Number of images loaded for a layer.
    #[must_use]
    pub fn image_count(&self, layer: Layer) -> usize {
        self.images[layer.slot()].len()
    }

    /// Resizes to `nx × ny` and fills the base layer with random tiles.
    ///
    /// The viewport shows the whole grid, tiles are [`TEST_TILE_SIZE`]
    /// pixels, and every base cell is drawn uniformly from the loaded tile
    /// images. Decorations and overlays are cleared. The same `seed` always
    /// produces the same grid.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NoTileImages`] if no tile image is loaded. The
    /// grid is left untouched.
    pub fn generate_test_grid(&mut self, nx: u32, ny: u32, seed: u64) -> MapResult<()> {
        let count = self.image_count(Layer::Tiles);
        if count == 0 {
            return Err(MapError::NoTileImages);
        }
        let upper = TileIndex::try_from(count).unwrap_or(NO_TILE);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let dice = Uniform::new(0, upper);
        let mut tiles = TileLayer::filled(nx, ny, 0);
        for cell in tiles.cells_mut() {
            *cell = rng.sample(dice);
        }

        self.layers = [tiles, TileLayer::empty(nx, ny), TileLayer::empty(nx, ny)];
        self.viewport = Viewport::new(nx, ny);
        self.tile_width = TEST_TILE_SIZE;
        self.tile_height = TEST_TILE_SIZE;

        tracing::debug!(nx, ny, images = count, seed, "test grid generated");
        Ok(())
    }

    /// Sets the display size in tiles and re-clamps the offset.
    pub fn set_display(&mut self, width: u32, height: u32) {
        self.viewport.set_display(width, height);
        tracing::trace!(
            display = ?self.viewport.display(),
            offset = ?self.viewport.offset(),
            "display set"
        );
    }

    /// Moves the viewport to `(x, y)`, clamped to the map.
    pub fn set_offset(&mut self, x: i64, y: i64) {
        self.viewport.set_offset(x, y);
    }

    /// Moves the viewport by `(dx, dy)`, clamped to the map.
    pub fn delta_offset(&mut self, dx: i64, dy: i64) {
        self.viewport.delta_offset(dx, dy);
    }

    /// Current viewport offset in tiles.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> (u32, u32) {
        self.viewport.offset()
    }

    /// The viewport.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Tile size in pixels.
    #[inline]
    #[must_use]
    pub const fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    /// Map size in tiles.
    #[inline]
    #[must_use]
    pub const fn extent(&self) -> (u32, u32) {
        self.viewport.extent()
    }

    /// Cells of a layer.
    #[inline]
    #[must_use]
    pub fn layer(&self, layer: Layer) -> &TileLayer {
        &self.layers[layer.slot()]
    }

    /// Mutable cells of a layer. The shape can't change through this.
    #[inline]
    pub fn layer_mut(&mut self, layer: Layer) -> &mut [TileIndex] {
        self.layers[layer.slot()].cells_mut()
    }

    /// Map cell under a screen pixel, if it is inside the display.
    #[must_use]
    pub fn cell_at_pixel(&self, px: i32, py: i32) -> Option<(u32, u32)> {
        let sx = u32::try_from(px).ok()? / self.tile_width.max(1);
        let sy = u32::try_from(py).ok()? / self.tile_height.max(1);
        let (dw, dh) = self.viewport.display();
        if sx >= dw || sy >= dh {
            return None;
        }
        let (ox, oy) = self.viewport.offset();
        Some((sx + ox, sy + oy))
    }

    /// Destination and image of every visible, non-empty cell of `layer`.
    fn resolve_visible(&self, layer: Layer) -> MapResult<Vec<(Rect, ImageHandle)>> {
        let cells = &self.layers[layer.slot()];
        let images = &self.images[layer.slot()];
        let tw = i32::try_from(self.tile_width).unwrap_or(i32::MAX);
        let th = i32::try_from(self.tile_height).unwrap_or(i32::MAX);

        let mut visible = Vec::new();
        for cell in self.viewport.visible_cells() {
            let index = cells
                .get(cell.world_x, cell.world_y)
                .ok_or(MapError::CellOutOfBounds {
                    x: cell.world_x,
                    y: cell.world_y,
                })?;
            if index == NO_TILE {
                continue;
            }
            let image = images.get(index as usize).ok_or(MapError::MissingImage {
                layer,
                index,
                loaded: images.len(),
            })?;
            let sx = i32::try_from(cell.screen_x).unwrap_or(i32::MAX);
            let sy = i32::try_from(cell.screen_y).unwrap_or(i32::MAX);
            visible.push((
                Rect::new(sx.saturating_mul(tw), sy.saturating_mul(th), tw, th),
                image,
            ));
        }
        Ok(visible)
    }

    /// Blits the visible part of `layer` onto `surface`. Returns the blit count.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::MissingImage`] before any blit if a visible cell
    /// has no loaded image, or [`MapError::Render`] if the surface fails.
    pub fn draw<S: Surface + ?Sized>(&self, layer: Layer, surface: &mut S) -> MapResult<usize> {
        let visible = self.resolve_visible(layer)?;
        let src = Rect::new(
            0,
            0,
            i32::try_from(self.tile_width).unwrap_or(i32::MAX),
            i32::try_from(self.tile_height).unwrap_or(i32::MAX),
        );
        for &(dest, image) in &visible {
            surface.blit(image, src, dest)?;
        }
        tracing::trace!(?layer, blits = visible.len(), "layer drawn");
        Ok(visible.len())
    }
}
