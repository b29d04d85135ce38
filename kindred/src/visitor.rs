//! Visitor registries.
//!
//! A registry bundles per-type handlers behind a [`TypeKey`]-indexed table,
//! so the dispatch engine can ask "do you handle this key" in O(1). Two
//! categories exist:
//!
//! - [`Visitor`]: a match always ends the probe.
//! - [`RecursiveVisitor`]: each handler decides, via [`Probe`], whether the
//!   walk keeps going to further ancestors.
//!
//! Handlers come in two flavors per type — shared (`on`) and exclusive
//! (`on_mut`). Read-only dispatch considers only the shared table; exclusive
//! dispatch prefers the exclusive handler and falls back to the shared one.
//! Registries hold no entity state and borrow nothing from the entities they
//! are run against; the `'h` lifetime lets handlers borrow caller state for
//! the duration of the dispatch calls.

use std::any::Any;

use rustc_hash::FxHashMap;

use crate::key::{key_of, TypeKey};

/// A recursive handler's verdict: end the walk here, or keep probing the
/// remaining ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Stop the walk at this handler.
    Stop,
    /// Keep probing further ancestors.
    Continue,
}

impl Probe {
    /// Whether this verdict ends the walk.
    pub fn is_stop(self) -> bool {
        matches!(self, Probe::Stop)
    }
}

type PlainRefHandler<'h> = Box<dyn FnMut(&dyn Any) + 'h>;
type PlainMutHandler<'h> = Box<dyn FnMut(&mut dyn Any) + 'h>;
type ProbeRefHandler<'h> = Box<dyn FnMut(&dyn Any) -> Probe + 'h>;
type ProbeMutHandler<'h> = Box<dyn FnMut(&mut dyn Any) -> Probe + 'h>;

/// A plain visitor: a fixed set of single-type handlers where the first
/// match terminates the search.
///
/// ```
/// use kindred::Visitor;
/// use std::cell::Cell;
///
/// let seen = Cell::new(0u64);
/// let visitor = Visitor::new()
///     .on::<u32>(|n: &u32| seen.set(u64::from(*n)))
///     .on::<u64>(|n: &u64| seen.set(*n));
/// assert!(visitor.handles_type::<u32>());
/// assert!(!visitor.handles_type::<i64>());
/// ```
#[derive(Default)]
pub struct Visitor<'h> {
    by_ref: FxHashMap<TypeKey, PlainRefHandler<'h>>,
    by_mut: FxHashMap<TypeKey, PlainMutHandler<'h>>,
}

impl<'h> Visitor<'h> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared-reference handler for `T`, replacing any earlier
    /// shared handler for the same type.
    pub fn on<T: Any>(mut self, mut handler: impl FnMut(&T) + 'h) -> Self {
        self.by_ref.insert(
            key_of::<T>(),
            Box::new(move |value| {
                if let Some(value) = value.downcast_ref::<T>() {
                    handler(value);
                }
            }),
        );
        self
    }

    /// Register an exclusive-reference handler for `T`, replacing any
    /// earlier exclusive handler for the same type.
    pub fn on_mut<T: Any>(mut self, mut handler: impl FnMut(&mut T) + 'h) -> Self {
        self.by_mut.insert(
            key_of::<T>(),
            Box::new(move |value| {
                if let Some(value) = value.downcast_mut::<T>() {
                    handler(value);
                }
            }),
        );
        self
    }

    /// Whether any handler (either flavor) is registered for `key`.
    pub fn handles(&self, key: TypeKey) -> bool {
        self.by_ref.contains_key(&key) || self.by_mut.contains_key(&key)
    }

    /// Whether any handler is registered for `T`.
    pub fn handles_type<T: Any>(&self) -> bool {
        self.handles(key_of::<T>())
    }

    pub(crate) fn has_ref(&self, key: TypeKey) -> bool {
        self.by_ref.contains_key(&key)
    }

    pub(crate) fn has_mut(&self, key: TypeKey) -> bool {
        self.by_mut.contains_key(&key)
    }

    pub(crate) fn ref_handler(&mut self, key: TypeKey) -> Option<&mut PlainRefHandler<'h>> {
        self.by_ref.get_mut(&key)
    }

    pub(crate) fn mut_handler(&mut self, key: TypeKey) -> Option<&mut PlainMutHandler<'h>> {
        self.by_mut.get_mut(&key)
    }
}

/// A recursive visitor: every matching ancestor is invoked until a handler
/// returns [`Probe::Stop`].
#[derive(Default)]
pub struct RecursiveVisitor<'h> {
    by_ref: FxHashMap<TypeKey, ProbeRefHandler<'h>>,
    by_mut: FxHashMap<TypeKey, ProbeMutHandler<'h>>,
}

impl<'h> RecursiveVisitor<'h> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared-reference handler for `T`, replacing any earlier
    /// shared handler for the same type.
    pub fn on<T: Any>(mut self, mut handler: impl FnMut(&T) -> Probe + 'h) -> Self {
        self.by_ref.insert(
            key_of::<T>(),
            Box::new(move |value| match value.downcast_ref::<T>() {
                Some(value) => handler(value),
                None => Probe::Continue,
            }),
        );
        self
    }

    /// Register an exclusive-reference handler for `T`, replacing any
    /// earlier exclusive handler for the same type.
    pub fn on_mut<T: Any>(mut self, mut handler: impl FnMut(&mut T) -> Probe + 'h) -> Self {
        self.by_mut.insert(
            key_of::<T>(),
            Box::new(move |value| match value.downcast_mut::<T>() {
                Some(value) => handler(value),
                None => Probe::Continue,
            }),
        );
        self
    }

    /// Whether any handler (either flavor) is registered for `key`.
    pub fn handles(&self, key: TypeKey) -> bool {
        self.by_ref.contains_key(&key) || self.by_mut.contains_key(&key)
    }

    /// Whether any handler is registered for `T`.
    pub fn handles_type<T: Any>(&self) -> bool {
        self.handles(key_of::<T>())
    }

    pub(crate) fn has_ref(&self, key: TypeKey) -> bool {
        self.by_ref.contains_key(&key)
    }

    pub(crate) fn has_mut(&self, key: TypeKey) -> bool {
        self.by_mut.contains_key(&key)
    }

    pub(crate) fn ref_handler(&mut self, key: TypeKey) -> Option<&mut ProbeRefHandler<'h>> {
        self.by_ref.get_mut(&key)
    }

    pub(crate) fn mut_handler(&mut self, key: TypeKey) -> Option<&mut ProbeMutHandler<'h>> {
        self.by_mut.get_mut(&key)
    }
}
