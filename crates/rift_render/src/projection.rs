//! # Viewport Projection
//!
//! Keeps a screen-space cache parallel to the entity store: row `i` here is
//! entity row `i` there. The cache is recomputed from world data on every
//! notification and never persisted.
//!
//! ## World to Screen
//!
//! ```text
//! screen = floor(sub_offset - frame_sub_offset) + (block - frame_block) * block_size
//! ```
//!
//! The fractional part keeps motion inside a block smooth; the integral
//! part keeps block-sized camera pans pixel exact. Results saturate at the
//! `i32` range.

use rift_core::{EntityStore, Observer, PositionData};

use crate::animation::{AnimationId, AnimationSet};
use crate::error::{RenderError, RenderResult};
use crate::surface::{Rect, Surface};

/// One cached screen entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenEntity {
    /// Where the entity lands on screen.
    pub dest_rect: Rect,
    /// Animation to draw, owned by an [`AnimationSet`].
    pub animation: Option<AnimationId>,
}

/// Reference frame of the projection.
#[derive(Clone, Copy, Debug)]
struct Frame {
    block_size: i32,
    block_x: i32,
    block_y: i32,
    sub_x: f32,
    sub_y: f32,
}

impl Frame {
    #[inline]
    fn project(&self, position: &PositionData) -> (i32, i32) {
        let sx = (position.x - self.sub_x).floor() as i32;
        let sy = (position.y - self.sub_y).floor() as i32;
        (
            sx.saturating_add(self.block_pixels(position.bx, self.block_x)),
            sy.saturating_add(self.block_pixels(position.by, self.block_y)),
        )
    }

    /// Pixel distance between two block coordinates, saturating at the
    /// edges of the screen coordinate range.
    #[inline]
    fn block_pixels(&self, block: i32, frame_block: i32) -> i32 {
        block
            .saturating_sub(frame_block)
            .saturating_mul(self.block_size)
    }
}

/// Screen-space mirror of the entity store.
#[derive(Debug)]
pub struct ViewportProjection {
    frame: Frame,
    screen: Vec<ScreenEntity>,
}

impl ViewportProjection {
    /// Creates a projection with its frame at block (0, 0).
    #[must_use]
    pub fn new(block_size: u32, capacity: usize) -> Self {
        Self {
            frame: Frame {
                block_size: i32::try_from(block_size).unwrap_or(i32::MAX),
                block_x: 0,
                block_y: 0,
                sub_x: 0.0,
                sub_y: 0.0,
            },
            screen: Vec::with_capacity(capacity),
        }
    }

    /// Maps a world position to screen pixels.
    #[inline]
    #[must_use]
    pub fn world_to_screen(&self, position: &PositionData) -> (i32, i32) {
        self.frame.project(position)
    }

    /// Appends a screen entry for a newly added entity and returns its row.
    ///
    /// Call this right after the matching world insertion so rows line up.
    pub fn add_entity(
        &mut self,
        position: &PositionData,
        animation: Option<AnimationId>,
    ) -> usize {
        let (x, y) = self.world_to_screen(position);
        self.screen.push(ScreenEntity {
            dest_rect: Rect::new(x, y, position.w, position.h),
            animation,
        });
        self.screen.len() - 1
    }

    /// Swap-removes a row, mirroring the world's removal.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ProjectionOutOfRange`] if `row` is not cached.
    pub fn remove_entity(&mut self, row: usize) -> RenderResult<ScreenEntity> {
        if row >= self.screen.len() {
            return Err(RenderError::ProjectionOutOfRange {
                index: row,
                len: self.screen.len(),
            });
        }
        Ok(self.screen.swap_remove(row))
    }

    /// Shifts the reference frame, e.g. to pan the camera.
    ///
    /// Offsets accumulate; they apply from the next recomputation on.
    pub fn offset(&mut self, block_dx: i32, block_dy: i32, sub_dx: f32, sub_dy: f32) {
        self.frame.block_x = self.frame.block_x.saturating_add(block_dx);
        self.frame.block_y = self.frame.block_y.saturating_add(block_dy);
        self.frame.sub_x += sub_dx;
        self.frame.sub_y += sub_dy;
    }

    /// Current frame origin: block and sub-block offset.
    #[must_use]
    pub fn origin(&self) -> (i32, i32, f32, f32) {
        let f = self.frame;
        (f.block_x, f.block_y, f.sub_x, f.sub_y)
    }

    /// Cached screen entries, row-aligned with the entity store.
    #[must_use]
    pub fn screen_entities(&self) -> &[ScreenEntity] {
        &self.screen
    }

    /// Draws every entry that has an animation. Returns the blit count.
    ///
    /// Entries whose animation is missing from `animations` are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the surface's blit failure.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        animations: &AnimationSet,
    ) -> RenderResult<usize> {
        let mut blits = 0;
        for entry in &self.screen {
            let Some(animation) = entry.animation.and_then(|id| animations.get(id)) else {
                continue;
            };
            surface.blit(animation.spritemap, animation.frame_rect(), entry.dest_rect)?;
            blits += 1;
        }
        Ok(blits)
    }
}

impl Observer for ViewportProjection {
    /// Recomputes destination positions only; sizes and animations are kept.
    fn update_view(&mut self, entities: &EntityStore) {
        if entities.len() != self.screen.len() {
            tracing::warn!(
                world = entities.len(),
                screen = self.screen.len(),
                "projection out of step with entity store"
            );
        }

        let frame = self.frame;
        for (entry, pos) in self.screen.iter_mut().zip(entities.positions()) {
            (entry.dest_rect.x, entry.dest_rect.y) = frame.project(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Animation;
    use crate::surface::{ImageHandle, RecordingSurface};
    use rift_core::{Action, ActorType, Attributes, MovementData, WorldState};

    #[test]
    fn test_world_to_screen_mixes_block_and_sub_block() {
        let projection = ViewportProjection::new(32, 0);
        let pos = PositionData::new(2, 3, 5.0, 5.0, 32, 32);
        assert_eq!(projection.world_to_screen(&pos), (69, 101));
    }

    #[test]
    fn test_sub_block_is_floored() {
        let mut projection = ViewportProjection::new(32, 0);
        projection.offset(0, 0, 0.5, 0.5);
        let pos = PositionData::new(0, 0, 0.25, 3.75, 1, 1);
        assert_eq!(projection.world_to_screen(&pos), (-1, 3));
    }

    #[test]
    fn test_offset_accumulates() {
        let mut projection = ViewportProjection::new(16, 0);
        projection.offset(1, 0, 2.0, 0.0);
        projection.offset(1, 2, 2.0, 0.0);
        assert_eq!(projection.origin(), (2, 2, 4.0, 0.0));

        let pos = PositionData::new(2, 2, 4.0, 0.0, 1, 1);
        assert_eq!(projection.world_to_screen(&pos), (0, 0));
    }

    #[test]
    fn test_far_blocks_saturate() {
        let mut projection = ViewportProjection::new(32, 0);
        let far = PositionData::new(i32::MAX, i32::MIN, 0.0, 0.0, 1, 1);
        assert_eq!(projection.world_to_screen(&far), (i32::MAX, i32::MIN));

        projection.offset(i32::MIN, i32::MAX, 0.0, 0.0);
        projection.offset(-1, 1, 0.0, 0.0);
        assert_eq!(projection.origin(), (i32::MIN, i32::MAX, 0.0, 0.0));
        let origin = PositionData::new(0, 0, 0.0, 0.0, 1, 1);
        assert_eq!(projection.world_to_screen(&origin), (i32::MAX, i32::MIN));
    }

    #[test]
    fn test_update_view_keeps_size() {
        let mut world = WorldState::new(1);
        let pos = PositionData::new(0, 0, 0.0, 0.0, 24, 12);
        world.add_entity(pos, MovementData::REST, ActorType::Player, Attributes::EMPTY);

        let mut projection = ViewportProjection::new(32, 1);
        projection.add_entity(&pos, None);

        world.apply(&[Action::Move { index: 0, dx: 40.0, dy: 8.0 }]).unwrap();
        projection.update_view(world.entities());

        assert_eq!(projection.screen_entities()[0].dest_rect, Rect::new(40, 8, 24, 12));
    }

    #[test]
    fn test_remove_mirrors_swap_pop() {
        let mut projection = ViewportProjection::new(32, 3);
        for bx in 0..3 {
            projection.add_entity(&PositionData::new(bx, 0, 0.0, 0.0, 1, 1), None);
        }
        let removed = projection.remove_entity(0).unwrap();
        assert_eq!(removed.dest_rect.x, 0);
        assert_eq!(projection.screen_entities()[0].dest_rect.x, 64);
        assert!(projection.remove_entity(5).is_err());
    }

    #[test]
    fn test_draw_uses_current_frame() {
        let mut animations = AnimationSet::new();
        let id = animations.insert(Animation::strip(ImageHandle(7), Rect::new(0, 0, 8, 8), 2));
        animations.advance_all();

        let mut projection = ViewportProjection::new(32, 2);
        projection.add_entity(&PositionData::new(1, 1, 0.0, 0.0, 8, 8), Some(id));
        projection.add_entity(&PositionData::new(0, 0, 0.0, 0.0, 8, 8), None);

        let mut surface = RecordingSurface::new();
        assert_eq!(projection.draw(&mut surface, &animations).unwrap(), 1);

        let blit = surface.blits()[0];
        assert_eq!(blit.image, ImageHandle(7));
        assert_eq!(blit.src, Rect::new(8, 0, 8, 8));
        assert_eq!(blit.dest, Rect::new(32, 32, 8, 8));
    }
}
