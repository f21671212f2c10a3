//! # Core Error Types
//!
//! All errors that can occur while mutating or observing world state.

use thiserror::Error;

/// Precondition failures on the entity store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityError {
    /// A row index was not below the live entity count.
    #[error("entity row {index} out of range (len {len})")]
    OutOfRange {
        /// The offending row.
        index: usize,
        /// Live entity count at the time of the call.
        len: usize,
    },

    /// Tried to remove from an empty store.
    #[error("cannot pop from an empty entity store")]
    EmptyStore,

    /// Attribute bit outside the 32-bit set.
    #[error("attribute bit {0} out of range (max 31)")]
    InvalidAttribute(u8),

    /// A handle whose entity has already been removed.
    #[error("stale entity handle")]
    StaleHandle,
}

/// Errors surfaced by [`crate::WorldState`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A command or mutation hit an entity precondition.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// The director could not produce this tick's commands.
    #[error("director failed: {0}")]
    Director(String),

    /// An observer was already locked when notification reached it.
    #[error("observer {position} is locked; notify must not re-enter an observer")]
    ObserverBusy {
        /// Attachment position of the observer.
        position: usize,
    },
}

/// Result type for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
