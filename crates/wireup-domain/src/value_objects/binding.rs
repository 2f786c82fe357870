//! Bindings, declarations, factories and provider methods.

use std::fmt;
use std::sync::Arc;

use crate::constants::PROVIDER_METHOD_PREFIX;
use crate::error::{Error, Result};
use crate::ports::{Arguments, Parameter};

use super::{ConstructionMetadata, DependencyKey, Instance, Scope, TypeKey};

type AdaptFn = dyn Fn(Instance) -> Result<Instance> + Send + Sync;
type FactoryFn = dyn Fn(&mut Arguments) -> Result<Instance> + Send + Sync;

/// Converts a constructed concrete instance into the interface it was bound
/// to (`Arc<ConsoleLogger>` into `Arc<dyn Logger>`).
#[derive(Clone)]
pub struct Adapter {
    interface: TypeKey,
    adapt: Arc<AdaptFn>,
}

impl Adapter {
    /// Build an adapter from an upcast, usually `|c| c`
    pub fn new<S, C, F>(upcast: F) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        C: Send + Sync + 'static,
        F: Fn(Arc<C>) -> Arc<S> + Send + Sync + 'static,
    {
        let interface = TypeKey::of::<S>();
        Self {
            interface,
            adapt: Arc::new(move |instance: Instance| {
                let concrete = instance.downcast::<C>().ok_or_else(|| {
                    Error::construction(
                        instance.type_name(),
                        format!(
                            "expected an instance of {} to adapt to {}",
                            std::any::type_name::<C>(),
                            interface
                        ),
                    )
                })?;
                Ok(Instance::new(upcast(concrete)))
            }),
        }
    }

    /// The interface this adapter produces
    pub fn interface(&self) -> TypeKey {
        self.interface
    }

    pub fn apply(&self, instance: Instance) -> Result<Instance> {
        (self.adapt)(instance)
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Adapter(-> {})", self.interface)
    }
}

/// A callable producing its return type directly, bypassing constructor
/// discovery. Its own parameters are resolved like constructor parameters.
#[derive(Clone)]
pub struct Factory {
    return_type: Option<TypeKey>,
    parameters: Vec<Parameter>,
    metadata: ConstructionMetadata,
    call: Arc<FactoryFn>,
}

impl Factory {
    /// Typed factory returning `Arc<T>`
    pub fn new<T, F>(parameters: Vec<Parameter>, call: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut Arguments) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Self {
            return_type: Some(TypeKey::of::<T>()),
            parameters,
            metadata: ConstructionMetadata::default(),
            call: Arc::new(move |args: &mut Arguments| call(args).map(Instance::new)),
        }
    }

    /// Factory without a declared return type.
    ///
    /// Usable in explicit table entries; rejected when discovered as a
    /// module provider method.
    pub fn untyped<F>(parameters: Vec<Parameter>, call: F) -> Self
    where
        F: Fn(&mut Arguments) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            return_type: None,
            parameters,
            metadata: ConstructionMetadata::default(),
            call: Arc::new(call),
        }
    }

    /// Attach construction metadata
    pub fn with_metadata(mut self, metadata: ConstructionMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn return_type(&self) -> Option<TypeKey> {
        self.return_type
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn metadata(&self) -> &ConstructionMetadata {
        &self.metadata
    }

    pub fn invoke(&self, args: &mut Arguments) -> Result<Instance> {
        (self.call)(args)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("return_type", &self.return_type)
            .field("parameters", &self.parameters)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// A module method offered to the binding table.
///
/// Only methods whose name starts with
/// [`PROVIDER_METHOD_PREFIX`] are registered.
#[derive(Debug, Clone)]
pub struct ProviderMethod {
    name: String,
    factory: Factory,
    scope: Scope,
}

impl ProviderMethod {
    /// Singleton-scoped provider method
    pub fn new(name: impl Into<String>, factory: Factory) -> Self {
        Self {
            name: name.into(),
            factory,
            scope: Scope::Singleton,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Whether the naming convention marks this method as a provider
    pub fn is_provider(&self) -> bool {
        self.name.starts_with(PROVIDER_METHOD_PREFIX)
    }
}

/// One `bind` call recorded by a module: `source` resolves to `target`.
#[derive(Debug, Clone)]
pub struct BindingDeclaration {
    source: DependencyKey,
    target: TypeKey,
    scope: Scope,
    adapter: Option<Adapter>,
}

impl BindingDeclaration {
    pub fn new(
        source: DependencyKey,
        target: TypeKey,
        scope: Scope,
        adapter: Option<Adapter>,
    ) -> Self {
        Self {
            source,
            target,
            scope,
            adapter,
        }
    }

    /// Copy of this declaration with a different scope
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn source(&self) -> &DependencyKey {
        &self.source
    }

    pub fn target(&self) -> TypeKey {
        self.target
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn adapter(&self) -> Option<&Adapter> {
        self.adapter.as_ref()
    }
}

/// What a dependency key resolves to.
#[derive(Debug, Clone)]
pub struct Binding {
    target: TypeKey,
    scope: Scope,
    factory: Option<Factory>,
    adapter: Option<Adapter>,
}

impl Binding {
    /// Self-binding used for unregistered, unqualified keys
    pub fn implicit(target: TypeKey, scope: Scope) -> Self {
        Self {
            target,
            scope,
            factory: None,
            adapter: None,
        }
    }

    /// Binding backed by a factory; the target is the key's type
    pub fn from_factory(target: TypeKey, factory: Factory, scope: Scope) -> Self {
        Self {
            target,
            scope,
            factory: Some(factory),
            adapter: None,
        }
    }

    pub fn target(&self) -> &TypeKey {
        &self.target
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn factory(&self) -> Option<&Factory> {
        self.factory.as_ref()
    }

    pub fn adapter(&self) -> Option<&Adapter> {
        self.adapter.as_ref()
    }

    /// Whether this binding came from a factory rather than a constructor
    pub fn is_factory(&self) -> bool {
        self.factory.is_some()
    }
}

impl From<BindingDeclaration> for Binding {
    fn from(declaration: BindingDeclaration) -> Self {
        Self {
            target: declaration.target,
            scope: declaration.scope,
            factory: None,
            adapter: declaration.adapter,
        }
    }
}
