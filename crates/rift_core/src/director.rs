//! # Directors
//!
//! A director looks at the current world and decides what should change this
//! tick. It never mutates entities itself: it returns commands, and the
//! caller applies them through [`crate::WorldState::apply`].

use crate::command::{Action, Command};
use crate::ecs::EntityStore;
use crate::error::WorldResult;

/// Policy producing one tick's worth of commands.
pub trait Director {
    /// The command type this director emits.
    type Command: Command;

    /// Produces the ordered command batch for one tick.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WorldError::Director`] if the batch cannot be built.
    /// No world state has been touched when this fails.
    fn direct(&mut self, entities: &EntityStore) -> WorldResult<Vec<Self::Command>>;
}

/// Advances every moving entity by a fixed time step.
#[derive(Clone, Copy, Debug)]
pub struct Integrator {
    /// Seconds per tick.
    pub dt: f32,
}

impl Integrator {
    /// Creates an integrator running at `ticks_per_second`.
    #[must_use]
    pub fn at_rate(ticks_per_second: u32) -> Self {
        Self {
            dt: 1.0 / ticks_per_second.max(1) as f32,
        }
    }
}

impl Director for Integrator {
    type Command = Action;

    fn direct(&mut self, entities: &EntityStore) -> WorldResult<Vec<Action>> {
        let anything_moving = entities.movements().iter().any(|m| !m.is_at_rest());
        Ok(if anything_moving {
            vec![Action::Integrate { dt: self.dt }]
        } else {
            Vec::new()
        })
    }
}
