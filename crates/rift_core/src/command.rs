//! # Commands
//!
//! A command is one unit of mutation against the entity store. The world
//! applies a batch of them in order; the first failure aborts the rest.
//!
//! [`Action`] is the built-in closed set. Anything else can implement
//! [`Command`] directly and travel as `Box<dyn Command>`.

use crate::ecs::{Attributes, EntityStore, PositionData};
use crate::error::EntityResult;

/// A single mutation of entity data.
pub trait Command {
    /// Applies the mutation.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::EntityError`] when a precondition (row range,
    /// attribute bit) does not hold.
    fn execute(&self, store: &mut EntityStore) -> EntityResult<()>;
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn execute(&self, store: &mut EntityStore) -> EntityResult<()> {
        (**self).execute(store)
    }
}

impl<C: Command + ?Sized> Command for &C {
    fn execute(&self, store: &mut EntityStore) -> EntityResult<()> {
        (**self).execute(store)
    }
}

/// Built-in commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Shift an entity's sub-block offset, carrying whole blocks.
    Move {
        /// Target row.
        index: usize,
        /// Pixels along x.
        dx: f32,
        /// Pixels along y.
        dy: f32,
    },
    /// Overwrite an entity's position.
    Place {
        /// Target row.
        index: usize,
        /// New position.
        position: PositionData,
    },
    /// Overwrite an entity's velocity.
    SetVelocity {
        /// Target row.
        index: usize,
        /// Pixels per second along x.
        vx: f32,
        /// Pixels per second along y.
        vy: f32,
    },
    /// Overwrite an entity's acceleration.
    SetAcceleration {
        /// Target row.
        index: usize,
        /// Pixels per second squared along x.
        ax: f32,
        /// Pixels per second squared along y.
        ay: f32,
    },
    /// Set or clear one attribute bit.
    SetAttribute {
        /// Target row.
        index: usize,
        /// Bit in `0..32`.
        bit: u8,
        /// New value.
        value: bool,
    },
    /// Advance every entity by `dt` seconds: `v += a*dt`, then `p += v*dt`.
    Integrate {
        /// Time step in seconds.
        dt: f32,
    },
}

impl Command for Action {
    fn execute(&self, store: &mut EntityStore) -> EntityResult<()> {
        match *self {
            Self::Move { index, dx, dy } => {
                store.check_row(index)?;
                let block_size = store.block_size();
                store.positions_mut()[index].translate(dx, dy, block_size);
            }
            Self::Place { index, position } => {
                store.check_row(index)?;
                let block_size = store.block_size();
                let slot = &mut store.positions_mut()[index];
                *slot = position;
                slot.normalize(block_size);
            }
            Self::SetVelocity { index, vx, vy } => {
                store.check_row(index)?;
                let movement = &mut store.movements_mut()[index];
                movement.vx = vx;
                movement.vy = vy;
            }
            Self::SetAcceleration { index, ax, ay } => {
                store.check_row(index)?;
                let movement = &mut store.movements_mut()[index];
                movement.ax = ax;
                movement.ay = ay;
            }
            Self::SetAttribute { index, bit, value } => {
                store.check_row(index)?;
                let mut attrs: Attributes = store.attributes()[index];
                attrs.set(bit, value)?;
                store.attributes_mut()[index] = attrs;
            }
            Self::Integrate { dt } => {
                let block_size = store.block_size();
                let (positions, movements) = store.kinematics_mut();
                for (pos, mov) in positions.iter_mut().zip(movements.iter_mut()) {
                    if mov.is_at_rest() {
                        continue;
                    }
                    mov.vx += mov.ax * dt;
                    mov.vy += mov.ay * dt;
                    pos.translate(mov.vx * dt, mov.vy * dt, block_size);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{ActorType, MovementData};
    use crate::error::EntityError;

    fn store_with_one() -> EntityStore {
        let mut store = EntityStore::with_capacity(1);
        store.push(
            PositionData::new(0, 0, 0.0, 0.0, 32, 32),
            MovementData::REST,
            ActorType::Player,
            Attributes::EMPTY,
        );
        store
    }

    #[test]
    fn test_move_carries_blocks() {
        let mut store = store_with_one();
        Action::Move { index: 0, dx: 70.0, dy: -1.0 }.execute(&mut store).unwrap();
        let pos = store.positions()[0];
        assert_eq!((pos.bx, pos.by), (2, -1));
        assert!((pos.x - 6.0).abs() < f32::EPSILON);
        assert!((pos.y - 31.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bad_row_is_rejected() {
        let mut store = store_with_one();
        let err = Action::SetVelocity { index: 1, vx: 1.0, vy: 1.0 }
            .execute(&mut store)
            .unwrap_err();
        assert_eq!(err, EntityError::OutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn test_bad_attribute_leaves_row_untouched() {
        let mut store = store_with_one();
        let err = Action::SetAttribute { index: 0, bit: 40, value: true }
            .execute(&mut store)
            .unwrap_err();
        assert_eq!(err, EntityError::InvalidAttribute(40));
        assert_eq!(store.attributes()[0], Attributes::EMPTY);
    }

    #[test]
    fn test_integrate_applies_acceleration_first() {
        let mut store = store_with_one();
        Action::SetVelocity { index: 0, vx: 2.0, vy: 0.0 }.execute(&mut store).unwrap();
        Action::SetAcceleration { index: 0, ax: 2.0, ay: 4.0 }.execute(&mut store).unwrap();
        Action::Integrate { dt: 1.0 }.execute(&mut store).unwrap();

        let mov = store.movements()[0];
        assert!((mov.vx - 4.0).abs() < f32::EPSILON);
        assert!((mov.vy - 4.0).abs() < f32::EPSILON);
        let pos = store.positions()[0];
        assert!((pos.x - 4.0).abs() < f32::EPSILON);
        assert!((pos.y - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_boxed_custom_command() {
        struct Nudge;
        impl Command for Nudge {
            fn execute(&self, store: &mut EntityStore) -> EntityResult<()> {
                store.positions_mut()[0].x += 1.0;
                Ok(())
            }
        }

        let mut store = store_with_one();
        let boxed: Box<dyn Command> = Box::new(Nudge);
        boxed.execute(&mut store).unwrap();
        assert!((store.positions()[0].x - 1.0).abs() < f32::EPSILON);
    }
}
