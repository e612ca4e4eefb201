//! # Entity: Opaque Handles
//!
//! An [`Entity`] carries no data of its own. It is a key into the
//! [`World`](super::world::World), which owns every record attached to it.
//!
//! ## Generations
//!
//! Each handle pairs a slot index with a generation counter. The confetti
//! population never despawns individual entities, but [`World::clear`]
//! releases every slot at once. Clearing bumps the generation of each slot,
//! so a handle kept from before the clear can never alias an entity created
//! after it.
//!
//! ```text
//! before clear:  Entity { index: 3, generation: 0 }
//! after clear:   slot 3 generation = 1, handle above is stale
//! next create:   Entity { index: 0, generation: 1 }
//! ```
//!
//! [`World::clear`]: super::world::World::clear

use std::fmt;

/// A lightweight handle to an entity in the [`World`](super::world::World).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Entity {
    /// Slot index. Stable for the lifetime of the entity.
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

/// Hands out entity slots and tracks which handles are still valid.
///
/// ```text
/// generations: [1, 1, 1]   one counter per slot ever handed out
/// free_list:   [2, 1, 0]   released slots, popped from the back
/// ```
pub(crate) struct EntityAllocator {
    generations: Vec<u32>,
    free_list: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Allocate a handle, reusing a released slot when one exists.
    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free_list.pop() {
            let generation = self.generations[index as usize];
            return Entity { index, generation };
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        Entity {
            index,
            generation: 0,
        }
    }

    /// Release every slot at once. All outstanding handles become stale.
    pub fn release_all(&mut self) {
        for generation in self.generations.iter_mut() {
            *generation = generation.wrapping_add(1);
        }
        // Reversed so that the next allocations pop 0, 1, 2, ...
        self.free_list = (0..self.generations.len() as u32).rev().collect();
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.generations.len()
            && self.generations[idx] == entity.generation
            && !self.free_list.contains(&entity.index)
    }

    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }
}
