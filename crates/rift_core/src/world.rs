//! # World State
//!
//! The single owner of entity data. Mutation goes through three doors:
//! - [`WorldState::apply`] runs a command batch
//! - [`WorldState::add_entity`] / [`WorldState::remove_entity`] for the
//!   composition root
//!
//! Observers are notified explicitly with [`WorldState::notify`] once a batch
//! has fully applied, so they never see a half-applied tick.
//!
//! ```text
//! input ──> Director ──> apply(commands) ──> notify() ──> Observer::update_view
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::command::Command;
use crate::director::Director;
use crate::ecs::{
    ActorType, Attributes, EntityId, EntityRow, EntityStore, MovementData, PositionData,
};
use crate::error::{EntityError, WorldError, WorldResult};

/// Something that mirrors world state, typically a view.
pub trait Observer {
    /// Refreshes the observer from the current entities.
    ///
    /// Called with read-only access; observers cannot mutate the world
    /// from inside the callback.
    fn update_view(&mut self, entities: &EntityStore);
}

/// Registered observer. The world holds it weakly and never keeps a view alive.
type ObserverRef = Weak<Mutex<dyn Observer>>;

/// Authoritative container of all entities plus their observers.
pub struct WorldState {
    store: EntityStore,
    observers: Vec<ObserverRef>,
}

impl WorldState {
    /// Creates an empty world sized for roughly `capacity` entities.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_store(EntityStore::with_capacity(capacity))
    }

    /// Wraps an already configured store.
    #[must_use]
    pub fn from_store(store: EntityStore) -> Self {
        Self {
            store,
            observers: Vec::with_capacity(16),
        }
    }

    /// Read access to the entities.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &EntityStore {
        &self.store
    }

    /// Registers an observer for notifications.
    ///
    /// Attaching the same observer twice is allowed and it will then be
    /// notified twice per [`notify`](Self::notify).
    pub fn attach<O: Observer + 'static>(&mut self, observer: &Arc<Mutex<O>>) {
        let shared: Arc<Mutex<dyn Observer>> = observer.clone();
        self.observers.push(Arc::downgrade(&shared));
        tracing::debug!(observers = self.observers.len(), "observer attached");
    }

    /// Removes the earliest registration of `observer`. Unknown observers are ignored.
    pub fn detach<O: Observer + 'static>(&mut self, observer: &Arc<Mutex<O>>) {
        let target = Arc::as_ptr(observer).cast::<()>();
        if let Some(position) = self
            .observers
            .iter()
            .position(|w| w.as_ptr().cast::<()>() == target)
        {
            self.observers.remove(position);
            tracing::debug!(observers = self.observers.len(), "observer detached");
        }
    }

    /// Number of registrations, including ones whose observer was dropped
    /// since the last [`notify`](Self::notify).
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Calls `update_view` on every live observer in attachment order.
    ///
    /// Registrations whose observer has been dropped are discarded first.
    /// Returns how many observers were updated.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ObserverBusy`] if an observer is locked by the
    /// caller. Observers before it have already been updated.
    pub fn notify(&mut self) -> WorldResult<usize> {
        let before = self.observers.len();
        self.observers.retain(|w| w.strong_count() > 0);
        if self.observers.len() != before {
            tracing::trace!(dropped = before - self.observers.len(), "pruned dead observers");
        }

        let mut updated = 0;
        for (position, weak) in self.observers.iter().enumerate() {
            let Some(observer) = weak.upgrade() else {
                continue;
            };
            let Some(mut guard) = observer.try_lock() else {
                return Err(WorldError::ObserverBusy { position });
            };
            guard.update_view(&self.store);
            updated += 1;
        }
        Ok(updated)
    }

    /// Executes `commands` in order.
    ///
    /// Returns the number of commands executed.
    ///
    /// # Errors
    ///
    /// The first failing command aborts the batch. Commands before it stay applied.
    pub fn apply<C: Command>(&mut self, commands: &[C]) -> WorldResult<usize> {
        for (executed, command) in commands.iter().enumerate() {
            if let Err(err) = command.execute(&mut self.store) {
                tracing::debug!(executed, total = commands.len(), %err, "command batch aborted");
                return Err(err.into());
            }
        }
        tracing::trace!(count = commands.len(), "command batch applied");
        Ok(commands.len())
    }

    /// Lets `director` read the world and returns its commands for this tick.
    ///
    /// Nothing is applied; pass the result to [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// Propagates the director's failure.
    pub fn simulate<D: Director>(&self, director: &mut D) -> WorldResult<Vec<D::Command>> {
        director.direct(&self.store)
    }

    /// Appends an entity and returns its row.
    ///
    /// Reserved for the composition root. Views that mirror rows must add a
    /// matching entry at the same row.
    pub fn add_entity(
        &mut self,
        position: PositionData,
        movement: MovementData,
        actor: ActorType,
        attributes: Attributes,
    ) -> usize {
        let row = self.store.push(position, movement, actor, attributes);
        tracing::debug!(row, ?actor, "entity added");
        row
    }

    /// Swap-removes the entity at `row`.
    ///
    /// The last entity moves into `row`; mirrored views must do the same.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::OutOfRange`] if `row` is not live.
    pub fn remove_entity(&mut self, row: usize) -> WorldResult<EntityRow> {
        let removed = self.store.swap_remove(row)?;
        tracing::debug!(row, remaining = self.store.len(), "entity removed");
        Ok(removed)
    }

    /// Removes the entity behind a stable handle. Returns the row it occupied.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::StaleHandle`] if the entity is already gone.
    pub fn despawn(&mut self, id: EntityId) -> WorldResult<usize> {
        let row = self.store.resolve(id).ok_or(EntityError::StaleHandle)?;
        self.remove_entity(row)?;
        Ok(row)
    }
}
