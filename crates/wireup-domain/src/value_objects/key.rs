//! Type and dependency keys.
//!
//! [`TypeKey`] is the runtime identity of a Rust type. Keys produced for
//! [`Injectable`](crate::ports::Injectable) types also carry a blueprint, the
//! function that describes how to build the type, so an unbound type can
//! still be constructed through an implicit self-binding.
//!
//! [`DependencyKey`] pairs a type with an optional qualifier. An absent
//! qualifier is its own value: it never matches a named binding, and a named
//! request never matches an unnamed one.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ports::{Constructor, Dependency, Injectable};

/// Produces the construction plan of a concrete type
pub type Blueprint = fn() -> Constructor;

/// Runtime identity of a (possibly unsized) type.
///
/// Equality and hashing only consider the [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    blueprint: Option<Blueprint>,
}

impl TypeKey {
    /// Key for any `'static` type, without construction information
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            blueprint: None,
        }
    }

    /// Key for an injectable type, carrying its blueprint
    pub fn constructible<T: Injectable>() -> Self {
        Self {
            blueprint: Some(Constructor::of::<T>),
            ..Self::of::<T>()
        }
    }

    /// The underlying [`TypeId`]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Construction blueprint, when the type is injectable
    pub fn blueprint(&self) -> Option<Blueprint> {
        self.blueprint
    }

    /// Whether this key describes `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
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

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identifies a requested dependency: a type and an optional qualifier.
///
/// Used both to look up bindings and to key the singleton cache.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DependencyKey {
    ty: TypeKey,
    qualifier: Option<String>,
}

impl DependencyKey {
    /// Create a key from its parts
    pub fn new(ty: TypeKey, qualifier: Option<String>) -> Self {
        Self { ty, qualifier }
    }

    /// Unqualified key for `T`
    pub fn of<T: ?Sized + Dependency>() -> Self {
        Self::new(T::type_key(), None)
    }

    /// Qualified key for `T`
    pub fn named<T: ?Sized + Dependency>(qualifier: impl Into<String>) -> Self {
        Self::new(T::type_key(), Some(qualifier.into()))
    }

    /// The requested type
    pub fn ty(&self) -> &TypeKey {
        &self.ty
    }

    /// The qualifier, if any
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Whether a qualifier is present
    pub fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }
}

impl fmt::Debug for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(name) => write!(f, "DependencyKey({}, name={:?})", self.ty.name, name),
            None => write!(f, "DependencyKey({})", self.ty.name),
        }
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(name) => write!(f, "{} [{}]", self.ty.name, name),
            None => f.write_str(self.ty.name),
        }
    }
}
