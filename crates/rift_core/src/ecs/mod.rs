//! # Entity Storage
//!
//! Structure-of-arrays entity data.
//!
//! ## Design Philosophy
//!
//! - Every attribute lives in its own contiguous column
//! - Rows are dense; removal is swap-and-pop
//! - Raw rows are not stable; [`EntityId`] handles are

mod component;
mod entity;
mod storage;

pub use component::{ActorType, Attributes, MovementData, PositionData};
pub use entity::{EntityId, SlotTable};
pub use storage::{EntityRow, EntityStore, DEFAULT_BLOCK_SIZE};
