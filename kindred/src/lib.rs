//! Ancestor-aware visitor dispatch and checked casts.
//!
//! `kindred` emulates dynamic, ancestor-aware dispatch over a declared
//! composition graph — including diamond sharing — without relying on any
//! language-level inheritance. Each entity kind declares an ordered,
//! deduplicated ancestor table once; dispatch walks that table against a
//! visitor registry, and checked casts reuse the same tables to recover a
//! concretely typed view of an erased entity.
//!
//! # Pieces
//!
//! 1. [`TypeKey`] — stable per-type identity (leaf utility).
//! 2. [`Lineage`] — per-kind ancestor table, self first, diamonds collapsed.
//! 3. [`Visitor`] / [`RecursiveVisitor`] — capability registries with O(1)
//!    lookup by key.
//! 4. [`dispatch()`] and friends — the probe engine, four call shapes.
//! 5. The entity family — declared kinds (via [`root_kind!`],
//!    [`derived_kind!`], [`join_kind!`], [`shared_join_kind!`]), the
//!    [`Facade`]/[`FacadeMut`] foreign-pointer adapters, [`InlineValue`],
//!    and [`EmptyEntity`].
//! 6. [`cast_ref`]/[`cast_mut`] and their erroring `try_` forms.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use kindred::{dispatch, derived_kind, root_kind, try_cast_ref, Visitor};
//!
//! struct Shape { sides: u32 }
//! root_kind!(Shape);
//!
//! struct Polygon { base: Shape }
//! derived_kind!(Polygon, base: Shape);
//!
//! let seen = Cell::new(0);
//! let mut visitor = Visitor::new().on::<Shape>(|s: &Shape| seen.set(s.sides));
//!
//! let entity = Polygon { base: Shape { sides: 5 } };
//! // Polygon itself is unhandled; the probe falls through to Shape.
//! dispatch(&entity, &mut visitor).unwrap();
//! assert_eq!(seen.get(), 5);
//!
//! let shape: &Shape = try_cast_ref(&entity).unwrap();
//! assert_eq!(shape.sides, 5);
//! ```
//!
//! Dispatch order is a property of the entity alone: the first ancestor
//! with a registered capability wins, no matter how the visitor was
//! assembled. Lineages are immutable after declaration and freely shareable
//! across threads; the engine owns neither entities nor visitors.

pub mod cast;
pub mod dispatch;
pub mod entity;
pub mod facade;
pub mod key;
pub mod lineage;
mod macros;
pub mod value;
pub mod visitor;

pub use cast::{cast_mut, cast_ref, try_cast_mut, try_cast_ref};
pub use dispatch::{
    dispatch, dispatch_mut, dispatch_recursive, dispatch_recursive_mut, IncompatibleVisitor,
};
pub use entity::{EmptyEntity, Entity, Kind};
pub use facade::{Facade, FacadeMut};
pub use key::{key_of, name_of, TypeKey};
pub use lineage::Lineage;
pub use value::InlineValue;
pub use visitor::{Probe, RecursiveVisitor, Visitor};
