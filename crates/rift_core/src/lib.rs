//! # RIFT Core
//!
//! Runtime world state for a 2D tile-based game:
//! - [`EntityStore`]: structure-of-arrays entity columns with swap-and-pop removal
//! - [`WorldState`]: sole owner of the store, applies commands, notifies observers
//! - [`Director`]: per-tick policy that turns a world snapshot into commands
//!
//! ## Tick Order
//!
//! 1. Handle input
//! 2. `simulate` a director, `apply` its commands
//! 3. `notify` observers
//! 4. Draw
//!
//! Everything runs on one thread, in that order, to completion.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rift_core::{Action, ActorType, Attributes, MovementData, PositionData, WorldState};
//!
//! let mut world = WorldState::new(64);
//! let row = world.add_entity(
//!     PositionData::default(),
//!     MovementData::REST,
//!     ActorType::Player,
//!     Attributes::EMPTY,
//! );
//! world.apply(&[Action::Move { index: row, dx: 4.0, dy: 0.0 }])?;
//! world.notify()?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod command;
pub mod director;
pub mod ecs;
pub mod error;
pub mod world;

pub use command::{Action, Command};
pub use director::{Director, Integrator};
pub use ecs::{
    ActorType, Attributes, EntityId, EntityRow, EntityStore, MovementData, PositionData,
    DEFAULT_BLOCK_SIZE,
};
pub use error::{EntityError, EntityResult, WorldError, WorldResult};
pub use world::{Observer, WorldState};
