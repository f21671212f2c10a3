//! # Viewport
//!
//! A display-sized window into a larger tile space. The offset always
//! satisfies, per axis:
//!
//! ```text
//! 0 <= offset <= extent - display
//! ```
//!
//! Requests outside that range are clamped, never rejected. Every mutation
//! re-clamps against the current extent and display, so a shrinking map or
//! a growing display can never leave a stale offset behind.

/// Clamps one axis of a requested offset.
#[inline]
fn clamp_axis(requested: i64, extent: u32, display: u32) -> u32 {
    let max = i64::from(extent.saturating_sub(display));
    u32::try_from(requested.clamp(0, max)).unwrap_or(0)
}

/// One cell of the display rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleCell {
    /// Column on screen, in tiles.
    pub screen_x: u32,
    /// Row on screen, in tiles.
    pub screen_y: u32,
    /// Column in the map.
    pub world_x: u32,
    /// Row in the map.
    pub world_y: u32,
}

/// Bounded window into a tile space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    x_extent: u32,
    y_extent: u32,
    display_width: u32,
    display_height: u32,
    x_offset: u32,
    y_offset: u32,
}

impl Viewport {
    /// Creates a viewport that shows the whole extent, so nothing scrolls.
    #[must_use]
    pub const fn new(x_extent: u32, y_extent: u32) -> Self {
        Self {
            x_extent,
            y_extent,
            display_width: x_extent,
            display_height: y_extent,
            x_offset: 0,
            y_offset: 0,
        }
    }

    /// Sets the display size in tiles, clamped to the extent.
    pub fn set_display(&mut self, width: u32, height: u32) {
        self.display_width = width.min(self.x_extent);
        self.display_height = height.min(self.y_extent);
        self.reclamp();
    }

    /// Sets the offset, clamping each axis independently.
    pub fn set_offset(&mut self, x: i64, y: i64) {
        self.x_offset = clamp_axis(x, self.x_extent, self.display_width);
        self.y_offset = clamp_axis(y, self.y_extent, self.display_height);
    }

    /// Moves the offset relative to its current value, with the same clamping.
    pub fn delta_offset(&mut self, dx: i64, dy: i64) {
        self.set_offset(
            i64::from(self.x_offset).saturating_add(dx),
            i64::from(self.y_offset).saturating_add(dy),
        );
    }

    fn reclamp(&mut self) {
        self.set_offset(i64::from(self.x_offset), i64::from(self.y_offset));
    }

    /// Current offset in tiles.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> (u32, u32) {
        (self.x_offset, self.y_offset)
    }

    /// Largest offset the current display allows.
    #[must_use]
    pub const fn max_offset(&self) -> (u32, u32) {
        (
            self.x_extent.saturating_sub(self.display_width),
            self.y_extent.saturating_sub(self.display_height),
        )
    }

    /// Display size in tiles.
    #[inline]
    #[must_use]
    pub const fn display(&self) -> (u32, u32) {
        (self.display_width, self.display_height)
    }

    /// Size of the tile space.
    #[inline]
    #[must_use]
    pub const fn extent(&self) -> (u32, u32) {
        (self.x_extent, self.y_extent)
    }

    /// True if a map cell is inside the display rectangle.
    #[must_use]
    pub const fn is_visible(&self, world_x: u32, world_y: u32) -> bool {
        world_x >= self.x_offset
            && world_y >= self.y_offset
            && world_x - self.x_offset < self.display_width
            && world_y - self.y_offset < self.display_height
    }

    /// Cells of the display rectangle, row by row.
    pub fn visible_cells(&self) -> impl Iterator<Item = VisibleCell> {
        let Self {
            display_width,
            display_height,
            x_offset,
            y_offset,
            ..
        } = *self;
        (0..display_height).flat_map(move |screen_y| {
            (0..display_width).map(move |screen_x| VisibleCell {
                screen_x,
                screen_y,
                world_x: screen_x + x_offset,
                world_y: screen_y + y_offset,
            })
        })
    }
}
