//! # Entity Handles
//!
//! Dense row indices change whenever an entity is swap-removed. Code that
//! must hold on to an entity across frames keeps an [`EntityId`] instead:
//! - Lower 32 bits: slot in the handle table
//! - Upper 32 bits: generation counter for detecting stale references
//!
//! The [`SlotTable`] resolves a slot to the entity's current row.

/// Stable identifier for an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new entity ID from slot and generation.
    #[inline]
    #[must_use]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (slot as u64))
    }

    /// Returns the slot portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Null/invalid entity ID.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this entity ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    generation: u32,
    /// Row the slot points at, `None` while the slot is free.
    row: Option<usize>,
}

/// Indirection table from stable slots to dense rows.
#[derive(Debug, Default)]
pub struct SlotTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl SlotTable {
    /// Creates a table with room for `capacity` live handles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Pre-allocates room for `additional` more handles.
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Hands out a fresh ID pointing at `row`.
    ///
    /// Freed slots are reused with a bumped generation so that IDs issued
    /// before the reuse no longer resolve.
    pub fn allocate(&mut self, row: usize) -> EntityId {
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.generation = entry.generation.wrapping_add(1);
            entry.row = Some(row);
            return EntityId::new(slot, entry.generation);
        }

        let slot = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            row: Some(row),
        });
        EntityId::new(slot, 0)
    }

    /// Points a live ID at a new row.
    pub fn relocate(&mut self, id: EntityId, row: usize) {
        if let Some(entry) = self.live_slot_mut(id) {
            entry.row = Some(row);
        }
    }

    /// Frees the slot behind `id`. Stale IDs are ignored.
    pub fn release(&mut self, id: EntityId) {
        if let Some(entry) = self.live_slot_mut(id) {
            entry.row = None;
            self.free.push(id.slot());
        }
    }

    /// Resolves an ID to its current row.
    #[must_use]
    pub fn resolve(&self, id: EntityId) -> Option<usize> {
        if id.is_null() {
            return None;
        }
        let entry = self.slots.get(id.slot() as usize)?;
        if entry.generation == id.generation() {
            entry.row
        } else {
            None
        }
    }

    fn live_slot_mut(&mut self, id: EntityId) -> Option<&mut Slot> {
        if id.is_null() {
            return None;
        }
        let entry = self.slots.get_mut(id.slot() as usize)?;
        (entry.generation == id.generation() && entry.row.is_some()).then_some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_roundtrip() {
        let id = EntityId::new(12345, 67890);
        assert_eq!(id.slot(), 12345);
        assert_eq!(id.generation(), 67890);
        assert!(EntityId::default().is_null());
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut table = SlotTable::with_capacity(4);
        let first = table.allocate(0);
        table.release(first);
        assert_eq!(table.resolve(first), None);

        let second = table.allocate(0);
        assert_eq!(second.slot(), first.slot());
        assert_ne!(second.generation(), first.generation());
        assert_eq!(table.resolve(second), Some(0));
    }

    #[test]
    fn test_relocate_follows_row() {
        let mut table = SlotTable::with_capacity(4);
        let a = table.allocate(0);
        let b = table.allocate(1);
        table.relocate(b, 0);
        table.release(a);

        assert_eq!(table.resolve(b), Some(0));
        assert_eq!(table.resolve(a), None);
    }

    #[test]
    fn test_stale_release_is_ignored() {
        let mut table = SlotTable::with_capacity(2);
        let a = table.allocate(0);
        table.release(a);
        let b = table.allocate(0);
        table.release(a);
        assert_eq!(table.resolve(b), Some(0));
    }
}
