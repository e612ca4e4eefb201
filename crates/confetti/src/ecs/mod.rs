//! # Entity Store
//!
//! A small archetype-based ECS holding the confetti population. Entities are
//! opaque generational ids; records (Position, Velocity, Color) live in
//! per-archetype columns and are visited by capability-set queries.
//!
//! - [`entity`]: generational ids and the slot allocator
//! - [`component`]: type-erased record columns
//! - [`archetype`]: tables grouping entities with the same record set
//! - [`query`]: closure-driven iteration over matching tables
//! - [`world`]: the store itself (create, attach, query, clear)

pub(crate) mod archetype;
pub(crate) mod component;
pub mod entity;
pub mod query;
pub mod world;

pub use entity::Entity;
pub use query::QueryParam;
pub use world::{SpawnBundle, World};
