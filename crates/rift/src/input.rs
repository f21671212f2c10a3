//! # Input Queue
//!
//! Whatever owns the window translates raw device events into
//! [`InputEvent`]s and pushes them through an [`InputSender`]. The game
//! drains the queue once per tick, before simulation.
//!
//! The queue is bounded. When it is full new events are dropped rather than
//! stalling the producer.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Default number of events in flight.
pub const INPUT_QUEUE_CAPACITY: usize = 256;

/// Screen direction of a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Negative y.
    Up,
    /// Positive y.
    Down,
    /// Negative x.
    Left,
    /// Positive x.
    Right,
}

impl Direction {
    /// Unit step for this direction.
    #[must_use]
    pub const fn unit(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// An already-interpreted input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Move the player one step.
    Move(Direction),
    /// Scroll the camera by whole tiles.
    Pan {
        /// Tiles along x.
        dx: i32,
        /// Tiles along y.
        dy: i32,
    },
    /// Stop the game loop.
    Quit,
}

/// Producer handle. Clone one per input source.
#[derive(Clone, Debug)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

impl InputSender {
    /// Queues an event without blocking.
    ///
    /// Returns `false` if the event was dropped because the queue is full
    /// or the game is gone.
    #[inline]
    pub fn send(&self, event: InputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "input queue full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consumer side, owned by the game.
#[derive(Debug)]
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl InputQueue {
    /// Creates a queue holding at most `capacity` pending events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// New producer handle.
    #[must_use]
    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    /// Takes every pending event, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(INPUT_QUEUE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_order() {
        let queue = InputQueue::new(8);
        let sender = queue.sender();
        assert!(sender.send(InputEvent::Move(Direction::Left)));
        assert!(sender.send(InputEvent::Quit));

        assert_eq!(queue.pending(), 2);
        assert_eq!(
            queue.drain(),
            vec![InputEvent::Move(Direction::Left), InputEvent::Quit]
        );
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_full_queue_drops() {
        let queue = InputQueue::new(1);
        let sender = queue.sender();
        assert!(sender.send(InputEvent::Quit));
        assert!(!sender.send(InputEvent::Pan { dx: 1, dy: 0 }));
        assert_eq!(queue.drain(), vec![InputEvent::Quit]);
    }

    #[test]
    fn test_sender_after_queue_dropped() {
        let queue = InputQueue::new(4);
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.send(InputEvent::Quit));
    }
}
