//! # Archetype: One Table per Record Set
//!
//! Entities holding exactly the same record kinds share an archetype. Every
//! confetti piece carries {Position, Velocity, Color}, so in practice the
//! whole population lives in a single table and a query is one linear scan.
//!
//! ```text
//! Archetype [Color, Position, Velocity]
//!
//!   Color:    [c0, c1, c2, ...]
//!   Position: [p0, p1, p2, ...]
//!   Velocity: [v0, v1, v2, ...]
//!   entities: [e0, e1, e2, ...]   row i in every column belongs to e_i
//! ```

use std::any::TypeId;
use std::collections::HashMap;

use super::component::RecordColumn;
use super::entity::Entity;

/// Sorted, deduplicated record type ids identifying an archetype, so that
/// `(A, B)` and `(B, A)` land in the same table.
pub(crate) type ArchetypeKey = Vec<TypeId>;

pub(crate) fn archetype_key(mut type_ids: Vec<TypeId>) -> ArchetypeKey {
    type_ids.sort();
    type_ids.dedup();
    type_ids
}

pub(crate) struct Archetype {
    pub columns: HashMap<TypeId, RecordColumn>,
    pub entities: Vec<Entity>,
}

impl Archetype {
    /// An empty table with one column per type in `key`.
    pub fn new(key: &ArchetypeKey) -> Self {
        let columns = key.iter().map(|&tid| (tid, RecordColumn::new())).collect();
        Self {
            columns,
            entities: Vec::new(),
        }
    }

    pub fn has_record(&self, type_id: &TypeId) -> bool {
        self.columns.contains_key(type_id)
    }

    /// True when this table holds every kind in `required`.
    pub fn matches(&self, required: &[TypeId]) -> bool {
        required.iter().all(|tid| self.has_record(tid))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }
}
