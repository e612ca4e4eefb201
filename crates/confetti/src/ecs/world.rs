//! # World: The Entity Store
//!
//! The [`World`] owns every entity and every record attached to one.
//!
//! ```text
//! World
//!   allocator:   generational slot ids
//!   archetypes:  HashMap<ArchetypeKey, Archetype>
//!                  key   = sorted record TypeIds
//!                  value = columns + parallel entity list
//!   locations:   HashMap<u32, EntityLocation>
//!                  entity index -> (archetype key, row)
//! ```
//!
//! The operations map onto the store contract directly:
//!
//! | contract              | method                          |
//! |-----------------------|---------------------------------|
//! | `create()`            | [`World::spawn_empty`]          |
//! | `attach(id, record)`  | [`World::insert`]               |
//! | `forEach(set, fn)`    | [`World::query`]                |
//! | `clear()`             | [`World::clear`]                |
//!
//! [`World::spawn`] combines create and attach for a whole tuple of records,
//! which is how the confetti population is built.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::archetype::{Archetype, ArchetypeKey, archetype_key};
use super::component::{RecordColumn, record_type_id};
use super::entity::{Entity, EntityAllocator};
use super::query::{QueryParam, capability_set};

#[derive(Clone)]
struct EntityLocation {
    archetype_key: ArchetypeKey,
    row: usize,
}

/// Every entity and record of the simulation.
pub struct World {
    allocator: EntityAllocator,
    archetypes: HashMap<ArchetypeKey, Archetype>,
    locations: HashMap<u32, EntityLocation>,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            archetypes: HashMap::new(),
            locations: HashMap::new(),
        }
    }

    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    // ── Create ──────────────────────────────────────────────────────

    /// Create an entity with no records attached.
    pub fn spawn_empty(&mut self) -> Entity {
        self.spawn_into(archetype_key(Vec::new()), |_| {})
    }

    /// Create an entity and attach a tuple of records to it.
    ///
    /// ```ignore
    /// let e = world.spawn((Position::new(5.0, 100.0), Velocity::new(-3.0, 2.0)));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the bundle holds two records of the same kind.
    pub fn spawn<B: SpawnBundle>(&mut self, bundle: B) -> Entity {
        let kinds = B::type_ids();
        let requested = kinds.len();
        let key = archetype_key(kinds);
        assert_eq!(
            key.len(),
            requested,
            "cannot spawn `{}`: a record kind appears twice",
            std::any::type_name::<B>()
        );
        self.spawn_into(key, |columns| bundle.push_into(columns))
    }

    fn spawn_into(
        &mut self,
        key: ArchetypeKey,
        fill: impl FnOnce(&mut HashMap<TypeId, RecordColumn>),
    ) -> Entity {
        let entity = self.allocator.allocate();
        let arch = self
            .archetypes
            .entry(key.clone())
            .or_insert_with(|| Archetype::new(&key));
        let row = arch.entities.len();
        arch.entities.push(entity);
        fill(&mut arch.columns);
        self.locations.insert(
            entity.index,
            EntityLocation {
                archetype_key: key,
                row,
            },
        );
        entity
    }

    // ── Attach ──────────────────────────────────────────────────────

    /// Attach a record to an existing entity. A record of the same kind is
    /// replaced; otherwise the entity moves to the archetype that includes
    /// the new kind.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn insert<T: 'static + Send + Sync>(&mut self, entity: Entity, record: T) {
        assert!(
            self.allocator.is_alive(entity),
            "cannot attach `{}` to dead entity {:?}",
            std::any::type_name::<T>(),
            entity
        );

        let loc = self.locations[&entity.index].clone();
        let tid = record_type_id::<T>();

        if let Some(col) = self
            .archetypes
            .get_mut(&loc.archetype_key)
            .and_then(|arch| arch.columns.get_mut(&tid))
        {
            col.replace(loc.row, record);
            return;
        }

        let mut new_ids = loc.archetype_key.clone();
        new_ids.push(tid);
        let new_key = archetype_key(new_ids);

        // Lift the entity's existing records out of its old table.
        let mut moved: HashMap<TypeId, Box<dyn Any + Send + Sync>> = HashMap::new();
        if let Some(old) = self.archetypes.get_mut(&loc.archetype_key) {
            for (&col_tid, col) in old.columns.iter_mut() {
                moved.insert(col_tid, col.take(loc.row));
            }
            old.entities.swap_remove(loc.row);
            if let Some(&swapped) = old.entities.get(loc.row) {
                if let Some(swapped_loc) = self.locations.get_mut(&swapped.index) {
                    swapped_loc.row = loc.row;
                }
            }
        }

        let new_arch = self
            .archetypes
            .entry(new_key.clone())
            .or_insert_with(|| Archetype::new(&new_key));
        let new_row = new_arch.entities.len();
        new_arch.entities.push(entity);
        for (&col_tid, col) in new_arch.columns.iter_mut() {
            if col_tid == tid {
                continue;
            }
            if let Some(value) = moved.remove(&col_tid) {
                col.push_boxed(value);
            }
        }
        if let Some(col) = new_arch.columns.get_mut(&tid) {
            col.push(record);
        }

        self.locations.insert(
            entity.index,
            EntityLocation {
                archetype_key: new_key,
                row: new_row,
            },
        );
    }

    // ── Per-Entity Access ───────────────────────────────────────────

    /// Returns `None` if the entity is dead or lacks the record.
    pub fn get<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        let loc = self.locations.get(&entity.index)?;
        let col = self
            .archetypes
            .get(&loc.archetype_key)?
            .columns
            .get(&TypeId::of::<T>())?;
        Some(col.get::<T>(loc.row))
    }

    /// Returns `None` if the entity is dead or lacks the record.
    pub fn get_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        let loc = self.locations.get(&entity.index)?;
        let col = self
            .archetypes
            .get_mut(&loc.archetype_key)?
            .columns
            .get_mut(&TypeId::of::<T>())?;
        Some(col.get_mut::<T>(loc.row))
    }

    // ── Query ───────────────────────────────────────────────────────

    /// Visit every entity holding all record kinds in `Q`.
    ///
    /// Order is table order: stable from one call to the next while no
    /// entity is created, but not otherwise guaranteed.
    ///
    /// # Panics
    ///
    /// Panics if `Q` names the same record kind twice.
    pub fn query<Q: QueryParam>(&mut self, mut f: impl FnMut(Entity, Q::Item<'_>)) {
        let required = capability_set::<Q>();
        for arch in self.archetypes.values_mut() {
            if arch.entities.is_empty() || !arch.matches(&required) {
                continue;
            }
            let mut lifted = Q::lift(&mut arch.columns);
            for (row, &entity) in arch.entities.iter().enumerate() {
                f(entity, Q::row(&mut lifted, row));
            }
            Q::put_back(lifted, &mut arch.columns);
        }
    }

    /// Number of entities a query over `Q` would visit.
    pub fn count<Q: QueryParam>(&self) -> usize {
        let required = capability_set::<Q>();
        self.archetypes
            .values()
            .filter(|arch| arch.matches(&required))
            .map(Archetype::len)
            .sum()
    }

    // ── Clear ───────────────────────────────────────────────────────

    /// Release every entity and record in one sweep. Handles issued before
    /// the call become stale.
    pub fn clear(&mut self) {
        for arch in self.archetypes.values_mut() {
            for col in arch.columns.values_mut() {
                col.clear();
            }
            arch.entities.clear();
        }
        self.archetypes.clear();
        self.locations.clear();
        self.allocator.release_all();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

// ── Spawn Bundles ───────────────────────────────────────────────────────

/// A tuple of records that can be attached in one [`World::spawn`] call.
pub trait SpawnBundle {
    fn type_ids() -> Vec<TypeId>;
    fn push_into(self, columns: &mut HashMap<TypeId, RecordColumn>);
}

macro_rules! impl_spawn_bundle {
    ($($T:ident),+) => {
        impl<$($T: 'static + Send + Sync),+> SpawnBundle for ($($T,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(record_type_id::<$T>()),+]
            }

            #[allow(non_snake_case)]
            fn push_into(self, columns: &mut HashMap<TypeId, RecordColumn>) {
                let ($($T,)+) = self;
                $(
                    columns
                        .get_mut(&record_type_id::<$T>())
                        .expect("bundle column created with its archetype")
                        .push::<$T>($T);
                )+
            }
        }
    };
}

impl_spawn_bundle!(A);
impl_spawn_bundle!(A, B);
impl_spawn_bundle!(A, B, C);
impl_spawn_bundle!(A, B, C, D);
