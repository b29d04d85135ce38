//! Type identity.
//!
//! Every participating type gets a process-wide unique [`TypeKey`] derived
//! from [`std::any::TypeId`]. The key also carries the compiler's type name
//! so diagnostics and `Debug` output stay readable; identity comparisons and
//! hashing ignore the name entirely.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque, comparable identity for a `'static` type.
///
/// Two keys are equal exactly when they were produced from the same type.
/// Keys are `Copy` and live for the whole process.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// The key for `T`. Equivalent to [`key_of`].
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The full type name this key was created from. Diagnostics only;
    /// never part of the identity.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

/// The unique key for `T`.
pub fn key_of<T: Any + ?Sized>() -> TypeKey {
    TypeKey::of::<T>()
}

/// The display name for `T`.
pub fn name_of<T: Any + ?Sized>() -> &'static str {
    type_name::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;

    #[test]
    fn test_same_type_same_key() {
        assert_eq!(key_of::<Alpha>(), key_of::<Alpha>());
        assert_eq!(key_of::<Alpha>(), TypeKey::of::<Alpha>());
    }

    #[test]
    fn test_distinct_types_never_alias() {
        assert_ne!(key_of::<Alpha>(), key_of::<Beta>());
        assert_ne!(key_of::<u32>(), key_of::<i32>());
    }

    #[test]
    fn test_name_is_informative() {
        assert!(name_of::<Alpha>().contains("Alpha"));
        assert!(key_of::<Beta>().name().contains("Beta"));
        assert_eq!(name_of::<i32>(), "i32");
    }

    #[test]
    fn test_hash_ignores_name() {
        use std::collections::hash_map::DefaultHasher;

        let a = key_of::<Alpha>();
        let b = key_of::<Alpha>();
        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }
}
