//! Deferred resolution handles.
//!
//! A [`Provider<T>`] lets a type depend on something it only needs later, or
//! needs under a qualifier chosen at call time. A `get` issued after the
//! owner was built starts a fresh resolution, which is how two types can
//! legitimately refer to each other. A `get` issued while the owner is still
//! being built continues the owner's resolution chain, so a back reference
//! is reported as a cycle.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use crate::error::{Error, Result};
use crate::value_objects::{DependencyKey, Instance, TypeKey};

use super::Dependency;

/// Engine-side entry point used by deferred handles
pub trait LazyResolver: Send + Sync {
    fn resolve_key(&self, key: &DependencyKey) -> Result<Instance>;
}

/// Untyped deferred handle produced by the engine.
///
/// Holds a weak reference so a singleton keeping a provider does not keep
/// its injector alive.
#[derive(Clone)]
pub struct DeferredHandle {
    resolver: Weak<dyn LazyResolver>,
    ty: TypeKey,
}

impl DeferredHandle {
    pub fn new(resolver: Weak<dyn LazyResolver>, ty: TypeKey) -> Self {
        Self { resolver, ty }
    }

    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// Resolve the handle's type under `qualifier`
    pub fn resolve(&self, qualifier: Option<&str>) -> Result<Instance> {
        let resolver = self.resolver.upgrade().ok_or_else(|| Error::EngineDropped {
            type_name: self.ty.name().to_string(),
        })?;
        resolver.resolve_key(&DependencyKey::new(self.ty, qualifier.map(str::to_owned)))
    }
}

impl fmt::Debug for DeferredHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredHandle({})", self.ty)
    }
}

/// Typed lazy handle: `get(name)` resolves `T` on demand.
pub struct Provider<T: ?Sized> {
    handle: DeferredHandle,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Dependency> Provider<T> {
    /// Handle for `T` backed by `resolver`
    pub fn new(resolver: Weak<dyn LazyResolver>) -> Self {
        Self {
            handle: DeferredHandle::new(resolver, T::type_key()),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Provider<T> {
    /// Type a handle produced for a deferred parameter
    pub fn from_handle(handle: DeferredHandle) -> Result<Self> {
        if !handle.type_key().is::<T>() {
            return Err(Error::construction(
                std::any::type_name::<T>(),
                format!("deferred handle was created for {}", handle.type_key()),
            ));
        }
        Ok(Self {
            handle,
            _marker: PhantomData,
        })
    }

    /// Resolve `T`, optionally under a qualifier
    pub fn get(&self, qualifier: Option<&str>) -> Result<Arc<T>> {
        let instance = self.handle.resolve(qualifier)?;
        instance.downcast::<T>().ok_or_else(|| {
            Error::construction(
                std::any::type_name::<T>(),
                format!("provider resolved an instance of {}", instance.type_name()),
            )
        })
    }

    pub fn type_key(&self) -> TypeKey {
        self.handle.type_key()
    }
}

impl<T: ?Sized> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Provider({})", self.handle.ty)
    }
}
