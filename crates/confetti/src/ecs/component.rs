//! # Record Columns
//!
//! Records (Position, Velocity, Color) are stored column-wise: one
//! [`RecordColumn`] per record kind per archetype. The archetype only knows a
//! [`TypeId`] for each column, so the column holds its values type-erased as
//! `Box<dyn Any + Send + Sync>` and recovers the concrete type with
//! `downcast_ref`/`downcast_mut`.
//!
//! A mismatch between the requested type and the stored type is a bug in
//! the store itself, so accessors panic rather than return an error.

use std::any::{Any, TypeId};

/// Type id of a record kind. Records must be `'static + Send + Sync`;
/// the bound is enforced where records enter the world.
pub(crate) fn record_type_id<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}

/// A type-erased column of records of a single kind. Opaque outside the
/// store; it only appears in [`QueryParam`](super::query::QueryParam) and
/// [`SpawnBundle`](super::world::SpawnBundle) plumbing.
pub struct RecordColumn {
    data: Vec<Box<dyn Any + Send + Sync>>,
}

impl RecordColumn {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn push<T: 'static + Send + Sync>(&mut self, value: T) {
        self.data.push(Box::new(value));
    }

    /// Push an already boxed record (used when an entity changes archetype).
    pub fn push_boxed(&mut self, value: Box<dyn Any + Send + Sync>) {
        self.data.push(value);
    }

    /// # Panics
    ///
    /// Panics if `row` is out of bounds or the column holds another type.
    pub fn get<T: 'static>(&self, row: usize) -> &T {
        self.data[row].downcast_ref().unwrap_or_else(|| {
            panic!(
                "record column type mismatch: expected `{}`",
                std::any::type_name::<T>()
            )
        })
    }

    /// # Panics
    ///
    /// Panics if `row` is out of bounds or the column holds another type.
    pub fn get_mut<T: 'static>(&mut self, row: usize) -> &mut T {
        self.data[row].downcast_mut().unwrap_or_else(|| {
            panic!(
                "record column type mismatch: expected `{}`",
                std::any::type_name::<T>()
            )
        })
    }

    /// Overwrite the record at `row`, dropping the previous value.
    pub fn replace<T: 'static + Send + Sync>(&mut self, row: usize, value: T) {
        *self.get_mut::<T>(row) = value;
    }

    /// Swap-remove the record at `row` and hand it back boxed. The last
    /// record moves into `row`.
    pub fn take(&mut self, row: usize) -> Box<dyn Any + Send + Sync> {
        self.data.swap_remove(row)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}
