//! Dispatch participants.
//!
//! An [`Entity`] is anything the dispatch engine can probe: it owns (or
//! derives) an ancestor [`Lineage`] and resolves each listed key to a view
//! of the matching sub-object. Declared kinds implement [`Kind`] as well,
//! which exposes the ancestry without an instance; the declaration macros
//! in this crate generate both impls from a struct whose parent sub-objects
//! are plain fields.
//!
//! The engine never owns an entity. Entities are created and destroyed by
//! the surrounding program; dispatch borrows them for the duration of one
//! call.

use std::any::Any;
use std::sync::OnceLock;

use crate::key::{name_of, TypeKey};
use crate::lineage::Lineage;

/// A declared entity kind with a statically known ancestry.
///
/// Not object-safe; use [`Entity`] for type-erased handling. The ancestry is
/// built once, on first request, and lives for the process lifetime.
pub trait Kind: Any {
    /// The kind's ancestor list, self first.
    fn ancestry() -> &'static Lineage;
}

/// An object-safe dispatch participant.
///
/// `lineage` and `lineage_const` give the probe orders for exclusive and
/// shared references; for most kinds they are the same list. `view` /
/// `view_mut` resolve a listed key to the sub-object that key identifies —
/// resolving a key outside the lineage yields `None`.
pub trait Entity {
    /// Probe order for exclusive references.
    fn lineage(&self) -> &Lineage;

    /// Probe order for shared references. Defaults to [`Entity::lineage`].
    fn lineage_const(&self) -> &Lineage {
        self.lineage()
    }

    /// Resolve `key` to a shared view of the matching sub-object.
    fn view(&self, key: TypeKey) -> Option<&dyn Any>;

    /// Resolve `key` to an exclusive view of the matching sub-object.
    fn view_mut(&mut self, key: TypeKey) -> Option<&mut dyn Any>;

    /// Kind name for diagnostics. Defaults to the head of the shared
    /// lineage.
    fn kind_name(&self) -> &'static str {
        self.lineage_const()
            .first()
            .map_or("<unnamed entity>", |key| key.name())
    }
}

/// An entity with no ancestors at all.
///
/// Plain dispatch on it always fails with
/// [`IncompatibleVisitor`](crate::IncompatibleVisitor); recursive dispatch
/// trivially succeeds without invoking anything; every cast misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEntity;

impl Entity for EmptyEntity {
    fn lineage(&self) -> &Lineage {
        static EMPTY: OnceLock<Lineage> = OnceLock::new();
        EMPTY.get_or_init(Lineage::empty)
    }

    fn view(&self, _key: TypeKey) -> Option<&dyn Any> {
        None
    }

    fn view_mut(&mut self, _key: TypeKey) -> Option<&mut dyn Any> {
        None
    }

    fn kind_name(&self) -> &'static str {
        name_of::<EmptyEntity>()
    }
}
