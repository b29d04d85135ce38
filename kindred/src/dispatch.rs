//! The dispatch engine.
//!
//! Walks an entity's ancestor list against a visitor registry, front to
//! back. Four call shapes cover shared/exclusive entity references crossed
//! with the plain/recursive visitor categories:
//!
//! - [`dispatch()`] / [`dispatch_mut`]: invoke the first ancestor with a
//!   registered handler; error with [`IncompatibleVisitor`] if none match.
//! - [`dispatch_recursive`] / [`dispatch_recursive_mut`]: invoke every
//!   matching ancestor until a handler returns [`Probe::Stop`]; a walk with
//!   zero matches is a silent success, never an error.
//!
//! A shared reference is only ever matched against shared handlers. An
//! exclusive reference prefers the exclusive handler for a key and falls
//! back to the shared one.
//!
//! Dispatch is synchronous and reentrant: a handler may dispatch another
//! entity (or the same entity through a shared borrow) with a different
//! registry.

use thiserror::Error;
use tracing::trace;

use crate::entity::Entity;
use crate::key::TypeKey;
use crate::visitor::{Probe, RecursiveVisitor, Visitor};

/// Plain dispatch (or an erroring cast) exhausted the entity's ancestor
/// list without finding a registered handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("incompatible visitor for `{kind}`")]
pub struct IncompatibleVisitor {
    /// Name of the entity kind that was probed.
    pub kind: &'static str,
}

impl IncompatibleVisitor {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

/// Plain dispatch over a shared entity reference.
///
/// Probes the read-only lineage front to back and runs the first shared
/// handler whose key matches.
pub fn dispatch(
    entity: &dyn Entity,
    visitor: &mut Visitor<'_>,
) -> Result<(), IncompatibleVisitor> {
    let kind = entity.kind_name();
    for key in entity.lineage_const().keys() {
        if visitor.has_ref(key) {
            if let Some(view) = entity.view(key) {
                trace!(kind, matched = key.name(), "dispatch");
                if let Some(handler) = visitor.ref_handler(key) {
                    handler(view);
                }
                return Ok(());
            }
        }
    }
    trace!(kind, "dispatch found no handler");
    Err(IncompatibleVisitor::new(kind))
}

/// Plain dispatch over an exclusive entity reference.
///
/// Probes the mutable lineage; for the first matching key, the exclusive
/// handler wins over the shared one.
pub fn dispatch_mut(
    entity: &mut dyn Entity,
    visitor: &mut Visitor<'_>,
) -> Result<(), IncompatibleVisitor> {
    let kind = entity.kind_name();
    let keys: Vec<TypeKey> = entity.lineage().keys().collect();
    for key in keys {
        if visitor.has_mut(key) {
            if let Some(view) = entity.view_mut(key) {
                trace!(kind, matched = key.name(), "dispatch_mut");
                if let Some(handler) = visitor.mut_handler(key) {
                    handler(view);
                }
                return Ok(());
            }
        }
        if visitor.has_ref(key) {
            if let Some(view) = entity.view(key) {
                trace!(kind, matched = key.name(), "dispatch_mut");
                if let Some(handler) = visitor.ref_handler(key) {
                    handler(view);
                }
                return Ok(());
            }
        }
    }
    trace!(kind, "dispatch_mut found no handler");
    Err(IncompatibleVisitor::new(kind))
}

/// Recursive dispatch over a shared entity reference.
///
/// Invokes every matching ancestor in probe order. Returns [`Probe::Stop`]
/// if a handler ended the walk early, [`Probe::Continue`] otherwise —
/// including when nothing matched at all.
pub fn dispatch_recursive(entity: &dyn Entity, visitor: &mut RecursiveVisitor<'_>) -> Probe {
    let kind = entity.kind_name();
    for key in entity.lineage_const().keys() {
        if visitor.has_ref(key) {
            if let Some(view) = entity.view(key) {
                let stopped = match visitor.ref_handler(key) {
                    Some(handler) => handler(view).is_stop(),
                    None => false,
                };
                if stopped {
                    trace!(kind, stopped_at = key.name(), "dispatch_recursive");
                    return Probe::Stop;
                }
            }
        }
    }
    Probe::Continue
}

/// Recursive dispatch over an exclusive entity reference.
///
/// Like [`dispatch_recursive`], but each matching key prefers its exclusive
/// handler and falls back to the shared one.
pub fn dispatch_recursive_mut(
    entity: &mut dyn Entity,
    visitor: &mut RecursiveVisitor<'_>,
) -> Probe {
    let kind = entity.kind_name();
    let keys: Vec<TypeKey> = entity.lineage().keys().collect();
    for key in keys {
        if visitor.has_mut(key) {
            if let Some(view) = entity.view_mut(key) {
                let stopped = match visitor.mut_handler(key) {
                    Some(handler) => handler(view).is_stop(),
                    None => false,
                };
                if stopped {
                    trace!(kind, stopped_at = key.name(), "dispatch_recursive_mut");
                    return Probe::Stop;
                }
                continue;
            }
        }
        if visitor.has_ref(key) {
            if let Some(view) = entity.view(key) {
                let stopped = match visitor.ref_handler(key) {
                    Some(handler) => handler(view).is_stop(),
                    None => false,
                };
                if stopped {
                    trace!(kind, stopped_at = key.name(), "dispatch_recursive_mut");
                    return Probe::Stop;
                }
            }
        }
    }
    Probe::Continue
}
