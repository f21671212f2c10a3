//! # Drawing Surface Boundary
//!
//! The core never owns pixels. It issues blits against an opaque
//! [`Surface`] and refers to images by [`ImageHandle`]s that an
//! [`ImageLoader`] handed out.
//!
//! [`RecordingSurface`] and [`HeadlessLoader`] implement the boundary
//! without any backend, for tests and headless runs.

use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};

use crate::error::{RenderError, RenderResult};

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Creates a rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Opaque reference to an image owned by the asset collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ImageHandle(pub u32);

/// A 2D pixel target.
pub trait Surface {
    /// Copies `src` of `image` to `dest` on this surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Blit`] if the backend rejects the copy.
    fn blit(&mut self, image: ImageHandle, src: Rect, dest: Rect) -> RenderResult<()>;
}

/// Turns image paths into handles.
pub trait ImageLoader {
    /// Loads one image.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ImageLoad`] if the image is unavailable.
    fn load_image(&mut self, path: &Path) -> RenderResult<ImageHandle>;
}

/// Ordered list of loaded images. Position in the list is the lookup key.
#[derive(Clone, Debug, Default)]
pub struct ImageTable {
    images: Vec<ImageHandle>,
}

impl ImageTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Loads every path in order, appending to the table.
    ///
    /// Returns the number of images now in the table.
    ///
    /// # Errors
    ///
    /// Stops at the first path the loader rejects; images loaded before it
    /// stay in the table.
    pub fn load_all<L, P>(&mut self, loader: &mut L, paths: &[P]) -> RenderResult<usize>
    where
        L: ImageLoader + ?Sized,
        P: AsRef<Path>,
    {
        self.images.reserve(paths.len());
        for path in paths {
            let handle = loader.load_image(path.as_ref())?;
            tracing::debug!(path = %path.as_ref().display(), ?handle, "image loaded");
            self.images.push(handle);
        }
        Ok(self.images.len())
    }

    /// Handle at `index`, if loaded.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ImageHandle> {
        self.images.get(index).copied()
    }

    /// Number of loaded images.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True if nothing is loaded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// One recorded blit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blit {
    /// Image that was drawn.
    pub image: ImageHandle,
    /// Source rectangle in the image.
    pub src: Rect,
    /// Destination rectangle on the surface.
    pub dest: Rect,
}

/// Surface that records blits instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    blits: Vec<Blit>,
}

impl RecordingSurface {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { blits: Vec::new() }
    }

    /// All blits since the last [`clear`](Self::clear).
    #[must_use]
    pub fn blits(&self) -> &[Blit] {
        &self.blits
    }

    /// Forgets recorded blits, typically at frame start.
    pub fn clear(&mut self) {
        self.blits.clear();
    }
}

impl Surface for RecordingSurface {
    fn blit(&mut self, image: ImageHandle, src: Rect, dest: Rect) -> RenderResult<()> {
        self.blits.push(Blit { image, src, dest });
        Ok(())
    }
}

/// Loader that hands out sequential handles without touching the disk.
#[derive(Clone, Debug, Default)]
pub struct HeadlessLoader {
    loaded: Vec<PathBuf>,
}

impl HeadlessLoader {
    /// Creates a loader with nothing loaded.
    #[must_use]
    pub const fn new() -> Self {
        Self { loaded: Vec::new() }
    }

    /// Paths loaded so far; a handle's value is its position here.
    #[must_use]
    pub fn loaded(&self) -> &[PathBuf] {
        &self.loaded
    }
}

impl ImageLoader for HeadlessLoader {
    fn load_image(&mut self, path: &Path) -> RenderResult<ImageHandle> {
        if path.file_name().is_none() {
            return Err(RenderError::ImageLoad {
                path: path.to_path_buf(),
                reason: "path has no file name".to_owned(),
            });
        }
        let handle = u32::try_from(self.loaded.len()).map_err(|_| RenderError::ImageLoad {
            path: path.to_path_buf(),
            reason: "too many images".to_owned(),
        })?;
        self.loaded.push(path.to_path_buf());
        Ok(ImageHandle(handle))
    }
}
