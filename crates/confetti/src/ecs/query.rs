//! # Query: Visiting Entities by Capability Set
//!
//! A query names the record kinds an entity must hold (its capability set)
//! and how each is accessed:
//!
//! ```text
//! world.query::<(&mut Position, &mut Velocity)>(|entity, (pos, vel)| { ... });
//! ```
//!
//! ## Closure Form
//!
//! Items borrow from the world, and std's `Iterator` cannot hand out items
//! that borrow from the iterator itself. The query therefore drives a
//! closure. For each matching archetype every requested column is taken out
//! of the archetype's map as a [`Lifted`] column, rows are visited in order,
//! and the columns go back in. Owning each lifted column separately is what
//! lets `&mut Position` and `&mut Velocity` be handed out together without
//! `unsafe`.
//!
//! A record kind can be lifted only once, so a capability set naming the
//! same kind twice (`(&Position, &mut Position)`) is rejected up front by
//! [`capability_set`], before any archetype is touched.
//!
//! Each call starts over from the first matching row and ends after the last
//! one; nothing is collected up front.

use std::any::TypeId;
use std::collections::HashMap;
use std::marker::PhantomData;

use super::component::RecordColumn;

/// A column of `T` records temporarily owned by a running query.
pub struct Lifted<T> {
    column: RecordColumn,
    kind: PhantomData<fn() -> T>,
}

impl<T: 'static + Send + Sync> Lifted<T> {
    fn take(columns: &mut HashMap<TypeId, RecordColumn>) -> Self {
        // Only reachable for archetypes that matched a duplicate-free set.
        let column = columns.remove(&TypeId::of::<T>()).unwrap_or_else(|| {
            panic!(
                "matched archetype has no `{}` column",
                std::any::type_name::<T>()
            )
        });
        Self {
            column,
            kind: PhantomData,
        }
    }

    fn put_back(self, columns: &mut HashMap<TypeId, RecordColumn>) {
        columns.insert(TypeId::of::<T>(), self.column);
    }
}

/// Something a query can fetch per row: `&T`, `&mut T`, or a tuple of them.
pub trait QueryParam {
    type Item<'w>;

    /// Columns owned by the query while it visits one archetype.
    type Lifted;

    /// Append the record kinds this parameter reads or writes.
    fn collect_kinds(kinds: &mut Vec<(TypeId, &'static str)>);

    fn lift(columns: &mut HashMap<TypeId, RecordColumn>) -> Self::Lifted;

    fn put_back(lifted: Self::Lifted, columns: &mut HashMap<TypeId, RecordColumn>);

    fn row(lifted: &mut Self::Lifted, row: usize) -> Self::Item<'_>;
}

/// The record kinds `Q` requires.
///
/// # Panics
///
/// Panics if `Q` names a record kind more than once.
pub fn capability_set<Q: QueryParam>() -> Vec<TypeId> {
    let mut kinds = Vec::new();
    Q::collect_kinds(&mut kinds);
    for (i, (tid, name)) in kinds.iter().enumerate() {
        assert!(
            kinds[..i].iter().all(|(seen, _)| seen != tid),
            "query names `{name}` twice"
        );
    }
    kinds.into_iter().map(|(tid, _)| tid).collect()
}

impl<T: 'static + Send + Sync> QueryParam for &T {
    type Item<'w> = &'w T;
    type Lifted = Lifted<T>;

    fn collect_kinds(kinds: &mut Vec<(TypeId, &'static str)>) {
        kinds.push((TypeId::of::<T>(), std::any::type_name::<T>()));
    }

    fn lift(columns: &mut HashMap<TypeId, RecordColumn>) -> Self::Lifted {
        Lifted::take(columns)
    }

    fn put_back(lifted: Self::Lifted, columns: &mut HashMap<TypeId, RecordColumn>) {
        lifted.put_back(columns);
    }

    fn row(lifted: &mut Self::Lifted, row: usize) -> Self::Item<'_> {
        lifted.column.get::<T>(row)
    }
}

impl<T: 'static + Send + Sync> QueryParam for &mut T {
    type Item<'w> = &'w mut T;
    type Lifted = Lifted<T>;

    fn collect_kinds(kinds: &mut Vec<(TypeId, &'static str)>) {
        kinds.push((TypeId::of::<T>(), std::any::type_name::<T>()));
    }

    fn lift(columns: &mut HashMap<TypeId, RecordColumn>) -> Self::Lifted {
        Lifted::take(columns)
    }

    fn put_back(lifted: Self::Lifted, columns: &mut HashMap<TypeId, RecordColumn>) {
        lifted.put_back(columns);
    }

    fn row(lifted: &mut Self::Lifted, row: usize) -> Self::Item<'_> {
        lifted.column.get_mut::<T>(row)
    }
}

macro_rules! tuple_query {
    ($($P:ident => $p:ident),+) => {
        impl<$($P: QueryParam),+> QueryParam for ($($P,)+) {
            type Item<'w> = ($($P::Item<'w>,)+);
            type Lifted = ($($P::Lifted,)+);

            fn collect_kinds(kinds: &mut Vec<(TypeId, &'static str)>) {
                $($P::collect_kinds(kinds);)+
            }

            fn lift(columns: &mut HashMap<TypeId, RecordColumn>) -> Self::Lifted {
                ($($P::lift(columns),)+)
            }

            fn put_back(lifted: Self::Lifted, columns: &mut HashMap<TypeId, RecordColumn>) {
                let ($($p,)+) = lifted;
                $($P::put_back($p, columns);)+
            }

            fn row(lifted: &mut Self::Lifted, row: usize) -> Self::Item<'_> {
                let ($($p,)+) = lifted;
                ($($P::row($p, row),)+)
            }
        }
    };
}

tuple_query!(A => a);
tuple_query!(A => a, B => b);
tuple_query!(A => a, B => b, C => c);
tuple_query!(A => a, B => b, C => c, D => d);
