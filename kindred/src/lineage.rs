//! Ancestor tables.
//!
//! A [`Lineage`] is the ordered, deduplicated list of type keys an entity is
//! probed against: the entity's own kind first, then everything it is
//! composed from. Lists are built once when a kind is declared and never
//! mutated afterwards, so they can be shared freely across threads.
//!
//! # Ordering
//!
//! Every entry carries a *rank*: roots sit at rank 0, and a derived or joined
//! kind sits one rank above the highest-ranked entry it inherits. A join
//! merges its parents' lists front to back — the first occurrence of a key
//! fixes where it enters the merge, later occurrences only raise its stored
//! rank — and the merged entries are then stable-sorted by rank, highest
//! first. Deeper kinds therefore probe before the roots they are built from,
//! and ties keep first-merge order. A diamond ancestor appears exactly once,
//! positioned by whichever parent reached it first.

use std::any::Any;

use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::key::{key_of, TypeKey};

/// One slot in a lineage: a type key and its derivation rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    key: TypeKey,
    rank: u32,
}

/// Ordered, deduplicated ancestor list for one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lineage {
    entries: Vec<Entry>,
}

impl Lineage {
    /// An empty list. Entities with an empty lineage match no visitor.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The lineage of a root kind: the kind itself and nothing else.
    pub fn root<T: Any>() -> Self {
        Self {
            entries: vec![Entry {
                key: key_of::<T>(),
                rank: 0,
            }],
        }
    }

    /// Extend a parent lineage with a new kind `T`, self first.
    ///
    /// `T` is placed one rank above the parent's highest entry, which keeps
    /// it at the front under the rank ordering.
    pub fn derive<T: Any>(&self) -> Self {
        let key = key_of::<T>();
        debug_assert!(!self.contains(key), "kind already present in its parent lineage");

        let rank = self.entries.first().map_or(0, |e| e.rank + 1);
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(Entry { key, rank });
        entries.extend(self.entries.iter().copied());
        Self { entries }
    }

    /// The lineage of a join kind `T` over the given parents, in declaration
    /// order: the parents' lists merged, with `T` prepended.
    pub fn join<T: Any>(parents: &[&Lineage]) -> Self {
        Self::merge(parents).derive::<T>()
    }

    /// Merge parent lists without adding a new head.
    ///
    /// Keys are visited parent by parent, front to back. The first
    /// occurrence of a key decides its insertion position; repeats are
    /// dropped after raising the stored rank to the maximum seen. The result
    /// is stable-sorted by rank, highest first.
    pub fn merge(parents: &[&Lineage]) -> Self {
        let mut seen: IndexMap<TypeKey, u32, FxBuildHasher> = IndexMap::default();
        for parent in parents {
            for entry in &parent.entries {
                match seen.entry(entry.key) {
                    MapEntry::Occupied(mut slot) => {
                        if entry.rank > *slot.get() {
                            slot.insert(entry.rank);
                        }
                    }
                    MapEntry::Vacant(slot) => {
                        slot.insert(entry.rank);
                    }
                }
            }
        }

        let mut entries: Vec<Entry> = seen
            .into_iter()
            .map(|(key, rank)| Entry { key, rank })
            .collect();
        entries.sort_by(|a, b| b.rank.cmp(&a.rank));
        Self { entries }
    }

    /// An authored list: the given keys in order, duplicates dropped.
    ///
    /// Used for facade and inline-value entities, whose ancestor sets are
    /// declared explicitly rather than derived. Authored entries all sit at
    /// rank 0 and are never re-sorted.
    pub fn from_keys<I: IntoIterator<Item = TypeKey>>(keys: I) -> Self {
        let mut lineage = Self::empty();
        for key in keys {
            lineage.push_key(key);
        }
        lineage
    }

    /// Append a key to an authored list, keeping insertion order. Returns
    /// `false` if the key was already present.
    pub fn push_key(&mut self, key: TypeKey) -> bool {
        if self.contains(key) {
            return false;
        }
        self.entries.push(Entry { key, rank: 0 });
        true
    }

    /// Iterate the keys in probe order.
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    /// Whether `key` appears anywhere in the list.
    pub fn contains(&self, key: TypeKey) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// The head of the list, normally the owning kind itself.
    pub fn first(&self) -> Option<TypeKey> {
        self.entries.first().map(|e| e.key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;
    struct C;
    struct D;
    struct E;
    struct F;
    struct X;

    fn keys(lineage: &Lineage) -> Vec<TypeKey> {
        lineage.keys().collect()
    }

    #[test]
    fn test_root_is_self_only() {
        let a = Lineage::root::<A>();
        assert_eq!(keys(&a), vec![key_of::<A>()]);
        assert_eq!(a.first(), Some(key_of::<A>()));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_derive_prepends_self() {
        let c = Lineage::root::<A>().derive::<C>();
        assert_eq!(keys(&c), vec![key_of::<C>(), key_of::<A>()]);
    }

    #[test]
    fn test_join_keeps_declaration_order() {
        let a = Lineage::root::<A>();
        let b = Lineage::root::<B>();
        let d = Lineage::join::<D>(&[&a, &b]);
        assert_eq!(keys(&d), vec![key_of::<D>(), key_of::<A>(), key_of::<B>()]);

        let bx = Lineage::join::<D>(&[&b, &Lineage::root::<X>()]);
        assert_eq!(keys(&bx), vec![key_of::<D>(), key_of::<B>(), key_of::<X>()]);
    }

    #[test]
    fn test_diamond_ancestor_appears_once() {
        let a = Lineage::root::<A>();
        let b = Lineage::root::<B>();
        let d = Lineage::join::<D>(&[&a, &b]);
        let e = Lineage::join::<E>(&[&d, &a, &Lineage::root::<X>()]);
        assert_eq!(
            keys(&e),
            vec![
                key_of::<E>(),
                key_of::<D>(),
                key_of::<A>(),
                key_of::<B>(),
                key_of::<X>(),
            ],
        );
    }

    #[test]
    fn test_nested_join_probe_order() {
        // The oracle for the merge tie-break: F = join(B, E),
        // E = join(D, A, X), D = join(A, B) probes F, E, D, B, A, X.
        let a = Lineage::root::<A>();
        let b = Lineage::root::<B>();
        let x = Lineage::root::<X>();
        let d = Lineage::join::<D>(&[&a, &b]);
        let e = Lineage::join::<E>(&[&d, &a, &x]);
        let f = Lineage::join::<F>(&[&b, &e]);
        assert_eq!(
            keys(&f),
            vec![
                key_of::<F>(),
                key_of::<E>(),
                key_of::<D>(),
                key_of::<B>(),
                key_of::<A>(),
                key_of::<X>(),
            ],
        );
    }

    #[test]
    fn test_join_reorders_around_deeper_parent() {
        // Joining a root before a derived kind still probes the derived kind
        // first: rank outranks declaration order.
        let x = Lineage::root::<X>();
        let c = Lineage::root::<A>().derive::<C>();
        let xc = Lineage::join::<D>(&[&x, &c]);
        assert_eq!(
            keys(&xc),
            vec![key_of::<D>(), key_of::<C>(), key_of::<X>(), key_of::<A>()],
        );
    }

    #[test]
    fn test_merge_without_head() {
        let c = Lineage::root::<A>().derive::<C>();
        let x = Lineage::root::<X>();
        let merged = Lineage::merge(&[&c, &x]);
        assert_eq!(
            keys(&merged),
            vec![key_of::<C>(), key_of::<A>(), key_of::<X>()],
        );
    }

    #[test]
    fn test_authored_list_preserves_order_and_dedups() {
        let mut lineage = Lineage::from_keys([key_of::<A>(), key_of::<B>(), key_of::<A>()]);
        assert_eq!(keys(&lineage), vec![key_of::<A>(), key_of::<B>()]);
        assert!(!lineage.push_key(key_of::<B>()));
        assert!(lineage.push_key(key_of::<X>()));
        assert_eq!(lineage.len(), 3);
    }

    #[test]
    fn test_empty() {
        let empty = Lineage::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.first(), None);
        assert!(!empty.contains(key_of::<A>()));
    }
}
