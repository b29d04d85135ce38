//! Foreign-pointer facades.
//!
//! A facade projects an externally owned value into the dispatch system
//! without the value's type joining the entity hierarchy. The ancestor list
//! is authored explicitly: it starts at the pointee's own type and grows by
//! [`expose`](Facade::expose)-ing named projections, each a checked
//! conversion to one listed type. The facade never owns the pointee — the
//! borrow it holds guarantees the pointee outlives every use.
//!
//! [`Facade`] wraps a shared borrow and serves read-only dispatch; use
//! [`FacadeMut`] when exclusive views are needed too.

use std::any::Any;

use crate::entity::Entity;
use crate::key::{key_of, TypeKey};
use crate::lineage::Lineage;

type RefProjection<T> = Box<dyn Fn(&T) -> &dyn Any>;
type MutProjection<T> = Box<dyn Fn(&mut T) -> &mut dyn Any>;

/// Read-only facade over a borrowed foreign value.
pub struct Facade<'p, T: Any> {
    target: &'p T,
    lineage: Lineage,
    projections: Vec<(TypeKey, RefProjection<T>)>,
}

impl<'p, T: Any> Facade<'p, T> {
    /// Wrap `target`. The ancestor list starts as `[T]`.
    pub fn new(target: &'p T) -> Self {
        Self {
            target,
            lineage: Lineage::root::<T>(),
            projections: Vec::new(),
        }
    }

    /// List `U` as an ancestor, resolved through the given projection.
    ///
    /// Exposing a type twice keeps the first projection.
    pub fn expose<U: Any>(mut self, project: impl Fn(&T) -> &U + 'static) -> Self {
        let key = key_of::<U>();
        if self.lineage.push_key(key) {
            self.projections
                .push((key, Box::new(move |target| project(target) as &dyn Any)));
        }
        self
    }

    /// The wrapped borrow.
    pub fn pointee(&self) -> &'p T {
        self.target
    }
}

impl<T: Any> Entity for Facade<'_, T> {
    fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    fn view(&self, key: TypeKey) -> Option<&dyn Any> {
        if key == key_of::<T>() {
            return Some(self.target as &dyn Any);
        }
        self.projections
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, project)| project(self.target))
    }

    fn view_mut(&mut self, _key: TypeKey) -> Option<&mut dyn Any> {
        None
    }
}

/// Facade over an exclusively borrowed foreign value; serves both shared
/// and exclusive views.
pub struct FacadeMut<'p, T: Any> {
    target: &'p mut T,
    lineage: Lineage,
    ref_projections: Vec<(TypeKey, RefProjection<T>)>,
    mut_projections: Vec<(TypeKey, MutProjection<T>)>,
}

impl<'p, T: Any> FacadeMut<'p, T> {
    /// Wrap `target`. The ancestor list starts as `[T]`.
    pub fn new(target: &'p mut T) -> Self {
        Self {
            target,
            lineage: Lineage::root::<T>(),
            ref_projections: Vec::new(),
            mut_projections: Vec::new(),
        }
    }

    /// List `U` as an ancestor, resolved through the given shared/exclusive
    /// projection pair.
    ///
    /// Exposing a type twice keeps the first pair.
    pub fn expose<U: Any>(
        mut self,
        project: impl Fn(&T) -> &U + 'static,
        project_mut: impl Fn(&mut T) -> &mut U + 'static,
    ) -> Self {
        let key = key_of::<U>();
        if self.lineage.push_key(key) {
            self.ref_projections
                .push((key, Box::new(move |target| project(target) as &dyn Any)));
            self.mut_projections.push((
                key,
                Box::new(move |target| project_mut(target) as &mut dyn Any),
            ));
        }
        self
    }

    /// The wrapped borrow.
    pub fn pointee(&self) -> &T {
        self.target
    }

    /// The wrapped borrow, exclusively.
    pub fn pointee_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: Any> Entity for FacadeMut<'_, T> {
    fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    fn view(&self, key: TypeKey) -> Option<&dyn Any> {
        if key == key_of::<T>() {
            return Some(&*self.target as &dyn Any);
        }
        self.ref_projections
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, project)| project(&*self.target))
    }

    fn view_mut(&mut self, key: TypeKey) -> Option<&mut dyn Any> {
        if key == key_of::<T>() {
            return Some(&mut *self.target as &mut dyn Any);
        }
        self.mut_projections
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, project)| project(&mut *self.target))
    }
}
