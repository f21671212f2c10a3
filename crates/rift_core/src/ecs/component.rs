//! # Entity Data
//!
//! Each entity row is spread across four parallel columns:
//! position, movement, actor type and attribute flags.
//! Columns are plain data with no behavior beyond small helpers.

use bytemuck::{Pod, Zeroable};

use crate::error::{EntityError, EntityResult};

/// Position of an entity in block space.
///
/// Block coordinates are integral tile-block identifiers. The sub-block
/// offset is fractional so motion inside a block stays smooth, while the
/// block part keeps camera math pixel exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PositionData {
    /// Block column.
    pub bx: i32,
    /// Block row.
    pub by: i32,
    /// Sub-block offset along x, in pixels.
    pub x: f32,
    /// Sub-block offset along y, in pixels.
    pub y: f32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl PositionData {
    /// Creates a position at a block with a sub-block offset and extent.
    #[inline]
    #[must_use]
    pub const fn new(bx: i32, by: i32, x: f32, y: f32, w: i32, h: i32) -> Self {
        Self { bx, by, x, y, w, h }
    }

    /// Translates the sub-block offset and carries whole blocks into `bx`/`by`.
    ///
    /// After the call `0.0 <= x < block_size` (same for `y`), so the same
    /// world point always has exactly one representation.
    pub fn translate(&mut self, dx: f32, dy: f32, block_size: u32) {
        self.x += dx;
        self.y += dy;
        self.normalize(block_size);
    }

    /// Moves whole blocks out of the sub-block offset.
    pub fn normalize(&mut self, block_size: u32) {
        if block_size == 0 {
            return;
        }
        let size = block_size as f32;
        let (x, carry_x) = carry(self.x, size);
        let (y, carry_y) = carry(self.y, size);
        self.x = x;
        self.y = y;
        self.bx = self.bx.saturating_add(carry_x);
        self.by = self.by.saturating_add(carry_y);
    }
}

/// Splits `value` into whole blocks and a remainder in `[0, size)`.
///
/// `value - floor(value / size) * size` can round up to exactly `size`
/// (e.g. a tiny negative offset), so that case carries once more.
fn carry(value: f32, size: f32) -> (f32, i32) {
    let blocks = (value / size).floor();
    let mut rest = value - blocks * size;
    let mut blocks = blocks as i32;
    if rest >= size {
        rest -= size;
        blocks = blocks.saturating_add(1);
    }
    (rest.max(0.0), blocks)
}

/// Velocity and acceleration of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct MovementData {
    /// Velocity along x, pixels per second.
    pub vx: f32,
    /// Velocity along y, pixels per second.
    pub vy: f32,
    /// Acceleration along x, pixels per second squared.
    pub ax: f32,
    /// Acceleration along y, pixels per second squared.
    pub ay: f32,
}

impl MovementData {
    /// A body at rest.
    pub const REST: Self = Self {
        vx: 0.0,
        vy: 0.0,
        ax: 0.0,
        ay: 0.0,
    };

    /// Creates movement data.
    #[inline]
    #[must_use]
    pub const fn new(vx: f32, vy: f32, ax: f32, ay: f32) -> Self {
        Self { vx, vy, ax, ay }
    }

    /// Returns true if neither velocity nor acceleration is set.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        *self == Self::REST
    }
}

/// What kind of actor an entity is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ActorType {
    /// Controlled by the player's input.
    #[default]
    Player = 0,
    /// Static scenery.
    Rock = 1,
    /// Loose pickup.
    Stick = 2,
}

/// Fixed-width set of 32 boolean traits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Attributes(u32);

impl Attributes {
    /// Number of addressable bits.
    pub const BITS: u8 = 32;

    /// No traits set.
    pub const EMPTY: Self = Self(0);

    /// Wraps a raw bit pattern.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bit pattern.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Tests a single trait.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidAttribute`] if `bit >= 32`.
    #[inline]
    pub fn test(self, bit: u8) -> EntityResult<bool> {
        Self::check(bit)?;
        Ok(self.0 & (1 << bit) != 0)
    }

    /// Sets or clears a single trait.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidAttribute`] if `bit >= 32`.
    #[inline]
    pub fn set(&mut self, bit: u8, value: bool) -> EntityResult<()> {
        Self::check(bit)?;
        if value {
            self.0 |= 1 << bit;
        } else {
            self.0 &= !(1 << bit);
        }
        Ok(())
    }

    /// Number of traits set.
    #[inline]
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    fn check(bit: u8) -> EntityResult<()> {
        if bit < Self::BITS {
            Ok(())
        } else {
            Err(EntityError::InvalidAttribute(bit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_carries_into_block() {
        let mut pos = PositionData::new(2, 3, 30.0, 5.0, 32, 32);
        pos.translate(4.0, -7.0, 32);
        assert_eq!((pos.bx, pos.by), (3, 2));
        assert!((pos.x - 2.0).abs() < f32::EPSILON);
        assert!((pos.y - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_translate_within_block() {
        let mut pos = PositionData::new(0, 0, 1.0, 1.0, 8, 8);
        pos.translate(0.5, 0.25, 32);
        assert_eq!((pos.bx, pos.by), (0, 0));
        assert!((pos.x - 1.5).abs() < f32::EPSILON);
        assert!((pos.y - 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_tiny_negative_offset_stays_in_block() {
        let mut pos = PositionData::new(5, 5, -1e-6, 31.999_999, 32, 32);
        pos.normalize(32);
        assert!(pos.x >= 0.0 && pos.x < 32.0);
        assert!(pos.y >= 0.0 && pos.y < 32.0);
        assert_eq!((pos.bx, pos.by), (5, 5));

        let mut pos = PositionData::new(0, 0, 0.0, 0.0, 1, 1);
        pos.translate(-1e-6, -32.0, 32);
        assert!(pos.x >= 0.0 && pos.x < 32.0);
        assert_eq!(pos.by, -1);
        assert!(pos.y.abs() < f32::EPSILON);
    }

    #[test]
    fn test_attributes_bits() {
        let mut attrs = Attributes::EMPTY;
        attrs.set(0, true).unwrap();
        attrs.set(31, true).unwrap();
        assert!(attrs.test(31).unwrap());
        assert!(!attrs.test(5).unwrap());
        assert_eq!(attrs.count(), 2);

        attrs.set(0, false).unwrap();
        assert_eq!(attrs.bits(), 1 << 31);
    }

    #[test]
    fn test_attributes_reject_wide_bit() {
        let mut attrs = Attributes::EMPTY;
        assert_eq!(attrs.set(32, true), Err(EntityError::InvalidAttribute(32)));
        assert_eq!(attrs.test(40), Err(EntityError::InvalidAttribute(40)));
    }

    #[test]
    fn test_component_sizes() {
        assert_eq!(std::mem::size_of::<PositionData>(), 24);
        assert_eq!(std::mem::size_of::<MovementData>(), 16);
        assert_eq!(std::mem::size_of::<Attributes>(), 4);
    }
}
