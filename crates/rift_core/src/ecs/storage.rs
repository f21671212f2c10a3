//! # Entity Store
//!
//! Structure-of-arrays storage for every live entity.
//!
//! The store keeps four parallel columns (position, movement, actor type,
//! attributes). Row `i` in each column is the same entity, and rows are
//! always dense in `0..len()`:
//! - `push` appends at `len()`
//! - removal swaps the victim with the last row, then pops
//!
//! Removal therefore moves the last entity into the freed row. Anything
//! caching raw row indices must be updated on every removal; code that needs
//! identity across frames should hold an [`EntityId`] and resolve it here.

use super::component::{ActorType, Attributes, MovementData, PositionData};
use super::entity::{EntityId, SlotTable};
use crate::error::{EntityError, EntityResult};

/// Default edge length of a block, in pixels.
pub const DEFAULT_BLOCK_SIZE: u32 = 32;

/// One entity's data, copied out of the columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityRow {
    /// Position column value.
    pub position: PositionData,
    /// Movement column value.
    pub movement: MovementData,
    /// Actor type column value.
    pub actor: ActorType,
    /// Attribute column value.
    pub attributes: Attributes,
}

/// Parallel-column container of all entity data.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = EntityStore::with_capacity(64);
/// let row = store.push(
///     PositionData::default(),
///     MovementData::REST,
///     ActorType::Rock,
///     Attributes::EMPTY,
/// );
/// store.swap_remove(row)?;
/// ```
#[derive(Debug)]
pub struct EntityStore {
    positions: Vec<PositionData>,
    movements: Vec<MovementData>,
    types: Vec<ActorType>,
    attributes: Vec<Attributes>,
    /// Stable handle for each row, kept in step with the four columns.
    ids: Vec<EntityId>,
    slots: SlotTable,
    block_size: u32,
}

impl EntityStore {
    /// Creates an empty store with room for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            movements: Vec::with_capacity(capacity),
            types: Vec::with_capacity(capacity),
            attributes: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
            slots: SlotTable::with_capacity(capacity),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Sets the block edge length used when carrying sub-block motion.
    #[must_use]
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    /// Edge length of a block, in pixels.
    #[inline]
    #[must_use]
    pub const fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Pre-allocates room for `additional` more entities in every column.
    pub fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
        self.movements.reserve(additional);
        self.types.reserve(additional);
        self.attributes.reserve(additional);
        self.ids.reserve(additional);
        self.slots.reserve(additional);
    }

    /// Appends an entity and returns its row.
    pub fn push(
        &mut self,
        position: PositionData,
        movement: MovementData,
        actor: ActorType,
        attributes: Attributes,
    ) -> usize {
        let row = self.len();
        self.positions.push(position);
        self.movements.push(movement);
        self.types.push(actor);
        self.attributes.push(attributes);
        self.ids.push(self.slots.allocate(row));
        row
    }

    /// Exchanges two full rows.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::OutOfRange`] if either row is `>= len()`.
    /// Nothing is touched in that case.
    pub fn swap(&mut self, first: usize, second: usize) -> EntityResult<()> {
        self.check_row(first)?;
        self.check_row(second)?;
        if first == second {
            return Ok(());
        }

        self.positions.swap(first, second);
        self.movements.swap(first, second);
        self.types.swap(first, second);
        self.attributes.swap(first, second);
        self.ids.swap(first, second);
        self.slots.relocate(self.ids[first], first);
        self.slots.relocate(self.ids[second], second);
        Ok(())
    }

    /// Removes the last row and returns its data.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::EmptyStore`] if there is nothing to pop.
    pub fn pop(&mut self) -> EntityResult<EntityRow> {
        let (Some(position), Some(movement), Some(actor), Some(attributes), Some(id)) = (
            self.positions.pop(),
            self.movements.pop(),
            self.types.pop(),
            self.attributes.pop(),
            self.ids.pop(),
        ) else {
            return Err(EntityError::EmptyStore);
        };

        self.slots.release(id);
        Ok(EntityRow {
            position,
            movement,
            actor,
            attributes,
        })
    }

    /// Removes `row` in O(1) by swapping it with the last row and popping.
    ///
    /// The entity previously at `len() - 1` now lives at `row`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::OutOfRange`] if `row >= len()`.
    pub fn swap_remove(&mut self, row: usize) -> EntityResult<EntityRow> {
        self.check_row(row)?;
        let last = self.len() - 1;
        self.swap(row, last)?;
        self.pop()
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if there are no live entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fails with [`EntityError::OutOfRange`] unless `row < len()`.
    ///
    /// # Errors
    ///
    /// See above.
    #[inline]
    pub fn check_row(&self, row: usize) -> EntityResult<()> {
        if row < self.len() {
            Ok(())
        } else {
            Err(EntityError::OutOfRange {
                index: row,
                len: self.len(),
            })
        }
    }

    /// Copies out a full row.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::OutOfRange`] if `row >= len()`.
    pub fn row(&self, row: usize) -> EntityResult<EntityRow> {
        self.check_row(row)?;
        Ok(EntityRow {
            position: self.positions[row],
            movement: self.movements[row],
            actor: self.types[row],
            attributes: self.attributes[row],
        })
    }

    /// Stable handle of the entity currently at `row`.
    #[must_use]
    pub fn id_of(&self, row: usize) -> Option<EntityId> {
        self.ids.get(row).copied()
    }

    /// Current row of a handle, or `None` if it was removed.
    #[must_use]
    pub fn resolve(&self, id: EntityId) -> Option<usize> {
        self.slots.resolve(id)
    }

    /// Position column.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[PositionData] {
        &self.positions
    }

    /// Mutable position column. The slice length is fixed.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [PositionData] {
        &mut self.positions
    }

    /// Movement column.
    #[inline]
    #[must_use]
    pub fn movements(&self) -> &[MovementData] {
        &self.movements
    }

    /// Mutable movement column. The slice length is fixed.
    #[inline]
    pub fn movements_mut(&mut self) -> &mut [MovementData] {
        &mut self.movements
    }

    /// Actor type column.
    #[inline]
    #[must_use]
    pub fn types(&self) -> &[ActorType] {
        &self.types
    }

    /// Attribute column.
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[Attributes] {
        &self.attributes
    }

    /// Mutable attribute column. The slice length is fixed.
    #[inline]
    pub fn attributes_mut(&mut self) -> &mut [Attributes] {
        &mut self.attributes
    }

    /// Mutable position and movement columns together, for integration.
    pub fn kinematics_mut(&mut self) -> (&mut [PositionData], &mut [MovementData]) {
        (&mut self.positions, &mut self.movements)
    }

    /// Rows holding actors of the given type.
    pub fn rows_of(&self, actor: ActorType) -> impl Iterator<Item = usize> + '_ {
        self.types
            .iter()
            .enumerate()
            .filter(move |(_, t)| **t == actor)
            .map(|(row, _)| row)
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
