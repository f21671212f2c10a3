//! Player control: turns queued move requests into world commands.

use rift_core::{Action, ActorType, Director, EntityStore, Integrator, WorldResult};

use crate::input::Direction;

/// Director that steps every player actor by the queued directions, then
/// integrates motion.
#[derive(Clone, Debug)]
pub struct PlayerControl {
    speed: f32,
    pending: Vec<Direction>,
    integrator: Integrator,
}

impl PlayerControl {
    /// Creates a controller moving `speed` pixels per direction event.
    #[must_use]
    pub fn new(speed: f32, ticks_per_second: u32) -> Self {
        Self {
            speed,
            pending: Vec::new(),
            integrator: Integrator::at_rate(ticks_per_second),
        }
    }

    /// Queues a move for the next tick.
    pub fn push(&mut self, direction: Direction) {
        self.pending.push(direction);
    }

    /// Moves queued since the last tick.
    #[must_use]
    pub fn pending(&self) -> &[Direction] {
        &self.pending
    }

    /// Net displacement of the queued moves, in pixels.
    fn step(&self) -> (f32, f32) {
        self.pending.iter().fold((0.0, 0.0), |(x, y), d| {
            let (ux, uy) = d.unit();
            (x + ux * self.speed, y + uy * self.speed)
        })
    }
}

impl Director for PlayerControl {
    type Command = Action;

    fn direct(&mut self, entities: &EntityStore) -> WorldResult<Vec<Action>> {
        let mut commands = Vec::new();
        if !self.pending.is_empty() {
            let (dx, dy) = self.step();
            commands.extend(
                entities
                    .rows_of(ActorType::Player)
                    .map(|index| Action::Move { index, dx, dy }),
            );
            self.pending.clear();
        }
        commands.extend(self.integrator.direct(entities)?);
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rift_core::{Attributes, MovementData, PositionData};

    fn store() -> EntityStore {
        let mut store = EntityStore::with_capacity(3);
        for actor in [ActorType::Rock, ActorType::Player, ActorType::Stick] {
            store.push(PositionData::default(), MovementData::REST, actor, Attributes::EMPTY);
        }
        store
    }

    #[test]
    fn test_moves_only_players() {
        let mut control = PlayerControl::new(4.0, 60);
        control.push(Direction::Right);
        control.push(Direction::Right);
        control.push(Direction::Up);

        let commands = control.direct(&store()).unwrap();
        assert_eq!(commands, vec![Action::Move { index: 1, dx: 8.0, dy: -4.0 }]);
        assert!(control.pending().is_empty());
    }

    #[test]
    fn test_idle_tick_is_empty() {
        let mut control = PlayerControl::new(4.0, 60);
        assert!(control.direct(&store()).unwrap().is_empty());
    }

    #[test]
    fn test_integrates_moving_world() {
        let mut entities = store();
        entities.movements_mut()[0] = MovementData::new(1.0, 0.0, 0.0, 0.0);

        let mut control = PlayerControl::new(4.0, 50);
        control.push(Direction::Down);
        let commands = control.direct(&entities).unwrap();
        assert_eq!(
            commands,
            vec![
                Action::Move { index: 1, dx: 0.0, dy: 4.0 },
                Action::Integrate { dt: 0.02 },
            ]
        );
    }
}
