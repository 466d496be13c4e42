//! Type keys for component storage and lookup.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a type a component can be resolved under.
///
/// Covers concrete types (`Database`) as well as trait object types
/// (`dyn Logger + Send + Sync`). The `TypeId` drives equality and hashing;
/// the name is kept for diagnostics only.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::TypeKey;
///
/// trait Logger: Send + Sync {}
///
/// let concrete = TypeKey::of::<String>();
/// assert_eq!(concrete.type_name(), "alloc::string::String");
///
/// let interface = TypeKey::of::<dyn Logger>();
/// assert!(interface.type_name().contains("Logger"));
/// assert_ne!(concrete, interface);
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of `T`, which may be unsized (`dyn Trait`).
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` backing this key.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Human readable type name, the `std::any::type_name` result.
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

// TypeId-only comparison, the name is diagnostics
impl PartialEq for TypeKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
