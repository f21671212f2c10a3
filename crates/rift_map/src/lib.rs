//! # RIFT Map
//!
//! Tile-space side of the engine:
//! - [`TileLayer`]: flat `x + y * width` array of [`TileIndex`] values
//! - [`Viewport`]: display window whose offset is always clamped into the map
//! - [`TileGrid`]: three layers, their image tables, and drawing through a
//!   [`rift_render::Surface`]
//! - [`MapDescription`]: the parsed map record a map file supplies
//!
//! ## Example
//!
//! ```
//! use rift_map::{Layer, TileGrid};
//! use rift_render::{HeadlessLoader, RecordingSurface};
//!
//! let mut grid = TileGrid::new();
//! grid.load_tile_images(&mut HeadlessLoader::new(), &["grass.png", "dirt.png"])?;
//! grid.generate_test_grid(16, 16, 7)?;
//! grid.set_display(8, 6);
//! grid.set_offset(100, -4);
//! assert_eq!(grid.offset(), (8, 0));
//!
//! let mut surface = RecordingSurface::new();
//! assert_eq!(grid.draw(Layer::Tiles, &mut surface)?, 48);
//! # Ok::<(), rift_map::MapError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod description;
pub mod error;
pub mod grid;
pub mod layer;
pub mod viewport;

pub use description::{MapDescription, MAX_MAP_PIXELS};
pub use error::{MapError, MapResult};
pub use grid::{TileGrid, TEST_TILE_SIZE};
pub use layer::{Layer, TileIndex, TileLayer, NO_TILE};
pub use viewport::{Viewport, VisibleCell};
