//! Type introspection contract.
//!
//! The engine never inspects types itself. It asks a [`TypeIntrospector`]
//! for the parameters of a concrete type or factory, for the qualifiers and
//! default arguments attached to them, and to invoke the constructor with the
//! resolved [`Arguments`].
//!
//! Concrete types describe themselves by implementing [`Injectable`]:
//!
//! ```ignore
//! struct Service {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! impl Injectable for Service {
//!     fn parameters() -> Vec<Parameter> {
//!         vec![Parameter::of::<dyn Logger>("logger")]
//!     }
//!
//!     fn construct(args: &mut Arguments) -> Result<Self> {
//!         Ok(Self { logger: args.take("logger")? })
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::{ConstructionMetadata, Factory, Instance, TypeKey};

use super::lazy::{DeferredHandle, Provider};

/// Maps a Rust type, sized or not, to its [`TypeKey`].
///
/// Every [`Injectable`] type is a dependency. Trait objects become one
/// through the [`interface!`](crate::interface) macro.
pub trait Dependency: Send + Sync + 'static {
    fn type_key() -> TypeKey;
}

impl<T: Injectable> Dependency for T {
    fn type_key() -> TypeKey {
        TypeKey::constructible::<T>()
    }
}

/// A concrete type the injector can build.
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Constructor parameters in declaration order
    fn parameters() -> Vec<Parameter> {
        Vec::new()
    }

    /// Named-instance, named-parameter and default-argument markers
    fn metadata() -> ConstructionMetadata {
        ConstructionMetadata::default()
    }

    /// Build the value from resolved arguments
    fn construct(args: &mut Arguments) -> Result<Self>;
}

/// What a parameter asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Resolve the dependency before construction
    Direct(TypeKey),
    /// Hand over a [`Provider`] that resolves on demand
    Deferred(TypeKey),
}

/// A declared constructor or factory parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    requirement: Option<Requirement>,
}

impl Parameter {
    /// Parameter resolved eagerly as `T`
    pub fn of<T: ?Sized + Dependency>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: Some(Requirement::Direct(T::type_key())),
        }
    }

    /// Parameter receiving a lazy [`Provider<T>`]
    pub fn deferred<T: ?Sized + Dependency>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: Some(Requirement::Deferred(T::type_key())),
        }
    }

    /// Parameter with no type information; the engine supplies nothing for it
    pub fn unannotated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement(&self) -> Option<Requirement> {
        self.requirement
    }
}

/// Resolved arguments handed to a constructor or factory, by parameter name.
#[derive(Debug, Default)]
pub struct Arguments {
    values: HashMap<String, Instance>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an argument unless one is already present.
    ///
    /// Returns `false` when the name was taken; the first writer wins.
    pub fn insert(&mut self, name: impl Into<String>, value: Instance) -> bool {
        match self.values.entry(name.into()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove and return a required argument as `Arc<T>`
    pub fn take<T: ?Sized + Send + Sync + 'static>(&mut self, name: &str) -> Result<Arc<T>> {
        self.optional(name)?.ok_or_else(|| {
            Error::construction(
                std::any::type_name::<T>(),
                format!("missing argument `{name}`"),
            )
        })
    }

    /// Remove and return an argument that may legitimately be absent
    pub fn optional<T: ?Sized + Send + Sync + 'static>(
        &mut self,
        name: &str,
    ) -> Result<Option<Arc<T>>> {
        let Some(instance) = self.values.remove(name) else {
            return Ok(None);
        };
        instance.downcast::<T>().map(Some).ok_or_else(|| {
            Error::construction(
                std::any::type_name::<T>(),
                format!(
                    "argument `{name}` holds {}, not {}",
                    instance.type_name(),
                    std::any::type_name::<T>()
                ),
            )
        })
    }

    /// Remove and return a deferred argument as a typed [`Provider`]
    pub fn provider<T: ?Sized + Send + Sync + 'static>(&mut self, name: &str) -> Result<Provider<T>> {
        let handle = self.take::<DeferredHandle>(name)?;
        Provider::from_handle((*handle).clone())
    }

    /// Clone out a copyable argument, e.g. a literal default
    pub fn value<T: Clone + Send + Sync + 'static>(&mut self, name: &str) -> Result<T> {
        self.take::<T>(name).map(|value| (*value).clone())
    }
}

type ConstructFn = dyn Fn(&mut Arguments) -> Result<Instance> + Send + Sync;

/// Construction plan of a concrete type: its parameters, its metadata and
/// the function that builds it.
#[derive(Clone)]
pub struct Constructor {
    target: TypeKey,
    parameters: Vec<Parameter>,
    metadata: ConstructionMetadata,
    build: Arc<ConstructFn>,
}

impl Constructor {
    /// Blueprint of an injectable type
    pub fn of<T: Injectable>() -> Self {
        Self {
            target: TypeKey::of::<T>(),
            parameters: T::parameters(),
            metadata: T::metadata(),
            build: Arc::new(|args: &mut Arguments| T::construct(args).map(Instance::from_value)),
        }
    }

    /// Explicitly registered constructor, for types that do not implement
    /// [`Injectable`] or need a different plan
    pub fn new<T, F>(parameters: Vec<Parameter>, build: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Arguments) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            target: TypeKey::of::<T>(),
            parameters,
            metadata: ConstructionMetadata::default(),
            build: Arc::new(move |args: &mut Arguments| build(args).map(Instance::from_value)),
        }
    }

    pub fn with_metadata(mut self, metadata: ConstructionMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn target(&self) -> TypeKey {
        self.target
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn metadata(&self) -> &ConstructionMetadata {
        &self.metadata
    }

    pub fn invoke(&self, args: &mut Arguments) -> Result<Instance> {
        (self.build)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("target", &self.target)
            .field("parameters", &self.parameters)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Supplies construction plans to the engine.
///
/// Implementations may use registration, generated metadata or the
/// blueprints carried by [`TypeKey`]s; the engine only sees this contract.
pub trait TypeIntrospector: Send + Sync {
    /// Declared parameters of the type's constructor, in order.
    ///
    /// Fails with a construction error when the type has no accessible
    /// constructor.
    fn constructor_requirements(&self, ty: &TypeKey) -> Result<Vec<Parameter>>;

    /// Per-parameter qualifier overrides (may be empty)
    fn parameter_qualifiers(&self, ty: &TypeKey) -> HashMap<String, String>;

    /// Qualifier attached to the type's construction entry point
    fn declared_instance_name(&self, ty: &TypeKey) -> Option<String>;

    /// Literal arguments that pre-empt resolution
    fn default_arguments(&self, ty: &TypeKey) -> Vec<(String, Instance)>;

    /// Build the type from resolved arguments
    fn invoke_constructor(&self, ty: &TypeKey, args: &mut Arguments) -> Result<Instance>;

    fn return_type(&self, factory: &Factory) -> Option<TypeKey> {
        factory.return_type()
    }

    fn factory_requirements(&self, factory: &Factory) -> Vec<Parameter> {
        factory.parameters().to_vec()
    }

    fn factory_metadata(&self, factory: &Factory) -> ConstructionMetadata {
        factory.metadata().clone()
    }
}
