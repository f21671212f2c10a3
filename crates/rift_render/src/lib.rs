//! # RIFT Render
//!
//! Screen-side half of the world/view split:
//! - [`ViewportProjection`]: per-entity screen cache, refreshed as a world [`rift_core::Observer`]
//! - [`Surface`], [`ImageLoader`], [`ImageTable`]: the boundary to whatever owns pixels
//! - [`AnimationSet`]: sprite strips referenced from screen entries
//!
//! Nothing here decodes images or talks to a window. Backends implement
//! [`Surface`] and [`ImageLoader`]; [`RecordingSurface`] and
//! [`HeadlessLoader`] stand in when there is no backend.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod error;
pub mod projection;
pub mod surface;

pub use animation::{Animation, AnimationId, AnimationSet};
pub use error::{RenderError, RenderResult};
pub use projection::{ScreenEntity, ViewportProjection};
pub use surface::{
    Blit, HeadlessLoader, ImageHandle, ImageLoader, ImageTable, RecordingSurface, Rect, Surface,
};
