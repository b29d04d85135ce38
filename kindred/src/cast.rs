//! Checked casts.
//!
//! A cast is a one-shot probe of an entity's ancestor list for a single
//! capability — the target type — sharing the engine's tables and probe
//! contract. Two surfaces exist per mutability:
//!
//! - [`cast_ref`] / [`cast_mut`]: quiet, `None` on a miss.
//! - [`try_cast_ref`] / [`try_cast_mut`]: a miss is an
//!   [`IncompatibleVisitor`] error, mirroring plain dispatch.
//!
//! The shared forms consult the read-only lineage and the exclusive forms
//! the mutable one, so a read-only-listed view is castable only through the
//! shared forms. Both forms of a hit return the same referent.

use std::any::Any;

use tracing::trace;

use crate::dispatch::IncompatibleVisitor;
use crate::entity::Entity;
use crate::key::key_of;

/// View `entity` as a `T`, or `None` if `T` is not among its ancestors.
pub fn cast_ref<T: Any>(entity: &dyn Entity) -> Option<&T> {
    let key = key_of::<T>();
    if !entity.lineage_const().contains(key) {
        trace!(kind = entity.kind_name(), target = key.name(), "cast missed");
        return None;
    }
    entity.view(key).and_then(|view| view.downcast_ref::<T>())
}

/// Exclusively view `entity` as a `T`, or `None` if `T` is not among its
/// mutable ancestors.
pub fn cast_mut<T: Any>(entity: &mut dyn Entity) -> Option<&mut T> {
    let key = key_of::<T>();
    if !entity.lineage().contains(key) {
        trace!(kind = entity.kind_name(), target = key.name(), "cast missed");
        return None;
    }
    entity
        .view_mut(key)
        .and_then(|view| view.downcast_mut::<T>())
}

/// Like [`cast_ref`], but a miss is an [`IncompatibleVisitor`] error
/// carrying the entity's kind name.
pub fn try_cast_ref<T: Any>(entity: &dyn Entity) -> Result<&T, IncompatibleVisitor> {
    let kind = entity.kind_name();
    cast_ref(entity).ok_or_else(|| IncompatibleVisitor::new(kind))
}

/// Like [`cast_mut`], but a miss is an [`IncompatibleVisitor`] error
/// carrying the entity's kind name.
pub fn try_cast_mut<T: Any>(entity: &mut dyn Entity) -> Result<&mut T, IncompatibleVisitor> {
    let kind = entity.kind_name();
    cast_mut(entity).ok_or_else(|| IncompatibleVisitor::new(kind))
}
