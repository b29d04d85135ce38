//! Declaration-time authoring interfaces.
//!
//! Each macro turns a plain struct into a declared entity kind by
//! implementing [`Kind`](crate::Kind) and [`Entity`](crate::Entity) for it.
//! Parent sub-objects are ordinary fields of the struct; the macro wires
//! view resolution through them and builds the kind's ancestor table once,
//! on first use.
//!
//! ```
//! use kindred::{derived_kind, root_kind, Kind};
//!
//! struct Shape { sides: u32 }
//! root_kind!(Shape);
//!
//! struct Polygon { base: Shape }
//! derived_kind!(Polygon, base: Shape);
//!
//! assert_eq!(Polygon::ancestry().len(), 2);
//! ```

/// Declare a root entity kind: no parents, ancestry `[Self]`.
#[macro_export]
macro_rules! root_kind {
    ($ty:ty) => {
        impl $crate::Kind for $ty {
            fn ancestry() -> &'static $crate::Lineage {
                static ANCESTRY: ::std::sync::OnceLock<$crate::Lineage> =
                    ::std::sync::OnceLock::new();
                ANCESTRY.get_or_init(|| $crate::Lineage::root::<$ty>())
            }
        }

        impl $crate::Entity for $ty {
            fn lineage(&self) -> &$crate::Lineage {
                <$ty as $crate::Kind>::ancestry()
            }

            fn view(&self, key: $crate::TypeKey) -> ::std::option::Option<&dyn ::std::any::Any> {
                if key == $crate::key_of::<$ty>() {
                    ::std::option::Option::Some(self)
                } else {
                    ::std::option::Option::None
                }
            }

            fn view_mut(
                &mut self,
                key: $crate::TypeKey,
            ) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                if key == $crate::key_of::<$ty>() {
                    ::std::option::Option::Some(self)
                } else {
                    ::std::option::Option::None
                }
            }
        }
    };
}

/// Declare a single-parent entity kind. The parent sub-object lives in the
/// named field; ancestry is the parent's list with `Self` prepended.
#[macro_export]
macro_rules! derived_kind {
    ($ty:ty, $field:ident: $parent:ty) => {
        impl $crate::Kind for $ty {
            fn ancestry() -> &'static $crate::Lineage {
                static ANCESTRY: ::std::sync::OnceLock<$crate::Lineage> =
                    ::std::sync::OnceLock::new();
                ANCESTRY.get_or_init(|| <$parent as $crate::Kind>::ancestry().derive::<$ty>())
            }
        }

        impl $crate::Entity for $ty {
            fn lineage(&self) -> &$crate::Lineage {
                <$ty as $crate::Kind>::ancestry()
            }

            fn view(&self, key: $crate::TypeKey) -> ::std::option::Option<&dyn ::std::any::Any> {
                if key == $crate::key_of::<$ty>() {
                    return ::std::option::Option::Some(self);
                }
                $crate::Entity::view(&self.$field, key)
            }

            fn view_mut(
                &mut self,
                key: $crate::TypeKey,
            ) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                if key == $crate::key_of::<$ty>() {
                    return ::std::option::Option::Some(self);
                }
                $crate::Entity::view_mut(&mut self.$field, key)
            }
        }
    };
}

/// Declare a plain join: independent parent sub-objects, one per field, in
/// declaration order. Parent ancestries must be disjoint (debug-asserted
/// when the table is first built); for overlapping parents use
/// [`shared_join_kind!`].
#[macro_export]
macro_rules! join_kind {
    ($ty:ty, $($field:ident: $parent:ty),+ $(,)?) => {
        impl $crate::Kind for $ty {
            fn ancestry() -> &'static $crate::Lineage {
                static ANCESTRY: ::std::sync::OnceLock<$crate::Lineage> =
                    ::std::sync::OnceLock::new();
                ANCESTRY.get_or_init(|| {
                    let lineage = $crate::Lineage::join::<$ty>(&[
                        $(<$parent as $crate::Kind>::ancestry()),+
                    ]);
                    debug_assert_eq!(
                        lineage.len(),
                        1usize $(+ <$parent as $crate::Kind>::ancestry().len())+,
                        "plain join parents share ancestors; declare a shared join instead",
                    );
                    lineage
                })
            }
        }

        $crate::__join_entity_impl!($ty, $($field: $parent),+);
    };
}

/// Declare a shared join: same ancestry computation as [`join_kind!`], but
/// parents may reach common ancestors. A shared ancestor resolves through
/// the first declared parent that lists it, so every probe path lands on
/// one canonical sub-object no matter how many copies the composition
/// embeds.
#[macro_export]
macro_rules! shared_join_kind {
    ($ty:ty, $($field:ident: $parent:ty),+ $(,)?) => {
        impl $crate::Kind for $ty {
            fn ancestry() -> &'static $crate::Lineage {
                static ANCESTRY: ::std::sync::OnceLock<$crate::Lineage> =
                    ::std::sync::OnceLock::new();
                ANCESTRY.get_or_init(|| {
                    $crate::Lineage::join::<$ty>(&[
                        $(<$parent as $crate::Kind>::ancestry()),+
                    ])
                })
            }
        }

        $crate::__join_entity_impl!($ty, $($field: $parent),+);
    };
}

/// Shared `Entity` impl for both join flavors. Not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __join_entity_impl {
    ($ty:ty, $($field:ident: $parent:ty),+) => {
        impl $crate::Entity for $ty {
            fn lineage(&self) -> &$crate::Lineage {
                <$ty as $crate::Kind>::ancestry()
            }

            fn view(&self, key: $crate::TypeKey) -> ::std::option::Option<&dyn ::std::any::Any> {
                if key == $crate::key_of::<$ty>() {
                    return ::std::option::Option::Some(self);
                }
                $(
                    if <$parent as $crate::Kind>::ancestry().contains(key) {
                        return $crate::Entity::view(&self.$field, key);
                    }
                )+
                ::std::option::Option::None
            }

            fn view_mut(
                &mut self,
                key: $crate::TypeKey,
            ) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                if key == $crate::key_of::<$ty>() {
                    return ::std::option::Option::Some(self);
                }
                $(
                    if <$parent as $crate::Kind>::ancestry().contains(key) {
                        return $crate::Entity::view_mut(&mut self.$field, key);
                    }
                )+
                ::std::option::Option::None
            }
        }
    };
}
