//! Type-erased instances.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::TypeKey;

/// A shared value produced by the injector.
///
/// Holds an `Arc<T>` behind `dyn Any`, where `T` may be a trait object.
/// Downcasting hands out clones of that inner `Arc`, so two downcasts of the
/// same cached instance are pointer-equal.
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    ty: TypeKey,
}

impl Instance {
    /// Wrap an already shared value
    pub fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            value: Arc::new(value),
            ty: TypeKey::of::<T>(),
        }
    }

    /// Wrap an owned value
    pub fn from_value<T: Send + Sync + 'static>(value: T) -> Self {
        Self::new(Arc::new(value))
    }

    /// The type this instance was wrapped as
    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// Name of the type this instance was wrapped as
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Whether the instance holds an `Arc<T>`
    pub fn is<T: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.value.is::<Arc<T>>()
    }

    /// Recover the typed `Arc<T>`
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// Whether both handles share the same allocation
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.ty.name())
            .finish()
    }
}
