//! # Sprite Animations
//!
//! An animation is a horizontal strip of equally spaced frames in one
//! spritemap. The set that owns them lives with the asset side; screen
//! entries only keep an [`AnimationId`].

use crate::surface::{ImageHandle, Rect};

/// Key of an animation inside an [`AnimationSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct AnimationId(pub u32);

/// A frame strip in a spritemap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    /// Image holding all frames.
    pub spritemap: ImageHandle,
    /// Horizontal distance between frames, in pixels.
    pub step_size: i32,
    /// Source rectangle of frame 0.
    pub src_rect: Rect,
    /// Current frame.
    pub frame: u32,
    /// Number of frames in the strip.
    pub max_frames: u32,
}

impl Animation {
    /// Creates a strip where frames are laid side by side, `src_rect.w` apart.
    #[must_use]
    pub const fn strip(spritemap: ImageHandle, src_rect: Rect, max_frames: u32) -> Self {
        Self {
            spritemap,
            step_size: src_rect.w,
            src_rect,
            frame: 0,
            max_frames,
        }
    }

    /// A single still image.
    #[must_use]
    pub const fn still(spritemap: ImageHandle, w: i32, h: i32) -> Self {
        Self::strip(spritemap, Rect::new(0, 0, w, h), 1)
    }

    /// Source rectangle of the current frame.
    #[must_use]
    pub fn frame_rect(&self) -> Rect {
        let offset = i32::try_from(self.frame).unwrap_or(0) * self.step_size;
        Rect {
            x: self.src_rect.x + offset,
            ..self.src_rect
        }
    }

    /// Moves to the next frame, wrapping at `max_frames`.
    pub fn advance(&mut self) {
        self.frame = if self.frame + 1 >= self.max_frames {
            0
        } else {
            self.frame + 1
        };
    }
}

/// Owner of all animations.
#[derive(Clone, Debug, Default)]
pub struct AnimationSet {
    animations: Vec<Animation>,
}

impl AnimationSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            animations: Vec::new(),
        }
    }

    /// Stores an animation and returns its key.
    pub fn insert(&mut self, animation: Animation) -> AnimationId {
        let id = AnimationId(u32::try_from(self.animations.len()).unwrap_or(u32::MAX));
        self.animations.push(animation);
        id
    }

    /// Looks up an animation.
    #[must_use]
    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(id.0 as usize)
    }

    /// Steps every animation one frame.
    pub fn advance_all(&mut self) {
        for animation in &mut self.animations {
            animation.advance();
        }
    }

    /// Number of stored animations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// True if no animation is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
