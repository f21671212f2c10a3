//! # RIFT
//!
//! Composition root of the RIFT engine. Wires the pieces of the other
//! crates into one tick loop:
//! - [`EngineConfig`]: startup settings from TOML
//! - [`InputQueue`]: bounded queue of interpreted input events
//! - [`PlayerControl`]: director that turns moves into world commands
//! - [`Game`]: owns world, projection and map; ticks and draws them
//!
//! ## Example
//!
//! ```
//! use rift::{Direction, EngineConfig, Game, InputEvent};
//! use rift_render::{HeadlessLoader, RecordingSurface};
//!
//! let mut game = Game::boxy(EngineConfig::default(), &mut HeadlessLoader::new())?;
//! game.input().send(InputEvent::Move(Direction::Right));
//! game.input().send(InputEvent::Quit);
//!
//! let mut surface = RecordingSurface::new();
//! game.run(&mut surface, Some(10))?;
//! assert!(!game.is_running());
//! # Ok::<(), rift::GameError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod control;
pub mod error;
pub mod game;
pub mod input;

pub use config::{EngineConfig, LoggingConfig, MapSource, PlayerConfig, WindowConfig, WorldConfig};
pub use control::PlayerControl;
pub use error::{ConfigError, ConfigResult, GameError, GameResult};
pub use game::Game;
pub use input::{Direction, InputEvent, InputQueue, InputSender, INPUT_QUEUE_CAPACITY};
