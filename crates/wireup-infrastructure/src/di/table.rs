//! Binding table
//!
//! Maps every [`DependencyKey`] to its [`Binding`]. Built once from module
//! declarations and discovered provider methods, read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace, warn};
use wireup_domain::error::{Error, Result};
use wireup_domain::{
    Binding, BindingDeclaration, DependencyKey, ProviderMethod, Scope, TypeIntrospector, TypeKey,
};

use super::introspection::ReflectiveIntrospector;
use super::module::{Binder, Module};

/// Immutable `DependencyKey -> Binding` mapping
#[derive(Debug, Clone)]
pub struct BindingTable {
    mappings: HashMap<DependencyKey, Binding>,
    implicit_scope: Scope,
}

impl BindingTable {
    /// Build a table from plain declarations followed by provider entries.
    ///
    /// Entries are applied in order; a later entry replaces an earlier one
    /// with the same key.
    pub fn build<D, P>(declarations: D, providers: P) -> Self
    where
        D: IntoIterator<Item = BindingDeclaration>,
        P: IntoIterator<Item = (DependencyKey, ProviderMethod)>,
    {
        let mut builder = TableBuilder::default();
        for declaration in declarations {
            builder.declare(declaration, None);
        }
        for (key, method) in providers {
            builder.provide(key, &method, None);
        }
        builder.finish()
    }

    /// Build a table from modules, introspecting provider methods with the
    /// default [`ReflectiveIntrospector`]
    pub fn from_modules(modules: &[Arc<dyn Module>]) -> Result<Self> {
        Self::from_modules_with(modules, &ReflectiveIntrospector::new())
    }

    /// Build a table from modules.
    ///
    /// For each module in order: its declarations, then its provider methods.
    pub fn from_modules_with(
        modules: &[Arc<dyn Module>],
        introspector: &dyn TypeIntrospector,
    ) -> Result<Self> {
        let mut builder = TableBuilder::default();

        for module in modules {
            let origin = module.name();
            let mut binder = Binder::new();
            module.configure(&mut binder);
            for declaration in binder.into_declarations() {
                builder.declare(declaration, Some(origin));
            }

            let mut provider_scopes: HashMap<DependencyKey, (String, Scope)> = HashMap::new();
            for method in module.provider_methods() {
                if !method.is_provider() {
                    trace!("Ignoring {}::{}: not a provider method", origin, method.name());
                    continue;
                }

                let key = provider_key(introspector, origin, &method)?;
                if let Some((previous, scope)) =
                    provider_scopes.insert(key.clone(), (method.name().to_string(), method.scope()))
                    && scope != method.scope()
                {
                    return Err(Error::configuration(format!(
                        "Provider methods `{previous}` ({scope}) and `{}` ({}) of {origin} \
                         both provide {key} with different scopes",
                        method.name(),
                        method.scope()
                    )));
                }

                builder.provide(key, &method, Some(origin));
            }
        }

        Ok(builder.finish())
    }

    /// Scope given to implicit self-bindings
    pub fn with_implicit_scope(mut self, scope: Scope) -> Self {
        self.implicit_scope = scope;
        self
    }

    /// Binding for `key`.
    ///
    /// An unqualified miss yields an implicit self-binding; a qualified miss
    /// is an [`Error::UnresolvedNamedBinding`].
    pub fn lookup(&self, key: &DependencyKey) -> Result<Binding> {
        if let Some(binding) = self.mappings.get(key) {
            return Ok(binding.clone());
        }
        if key.is_qualified() {
            return Err(Error::unresolved_named(key));
        }
        Ok(Binding::implicit(*key.ty(), self.implicit_scope))
    }

    pub fn implicit_scope(&self) -> Scope {
        self.implicit_scope
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Whether `key` has an explicit binding
    pub fn contains(&self, key: &DependencyKey) -> bool {
        self.mappings.contains_key(key)
    }

    /// Explicitly bound keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &DependencyKey> {
        self.mappings.keys()
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self {
            mappings: HashMap::new(),
            implicit_scope: Scope::Singleton,
        }
    }
}

fn provider_key(
    introspector: &dyn TypeIntrospector,
    origin: &str,
    method: &ProviderMethod,
) -> Result<DependencyKey> {
    let return_type: TypeKey = introspector.return_type(method.factory()).ok_or_else(|| {
        Error::configuration(format!(
            "Provider method `{}` of {origin} has no declared return type",
            method.name()
        ))
    })?;
    let metadata = introspector.factory_metadata(method.factory());
    Ok(DependencyKey::new(
        return_type,
        metadata.instance_name().map(str::to_owned),
    ))
}

/// Mutable staging area, tracking which module last wrote each key
#[derive(Default)]
struct TableBuilder {
    mappings: HashMap<DependencyKey, Binding>,
    origins: HashMap<DependencyKey, &'static str>,
}

impl TableBuilder {
    fn declare(&mut self, declaration: BindingDeclaration, origin: Option<&'static str>) {
        let key = declaration.source().clone();
        debug!("Bind {} to {}", key, declaration.target());
        self.insert(key, Binding::from(declaration), origin);
    }

    fn provide(&mut self, key: DependencyKey, method: &ProviderMethod, origin: Option<&'static str>) {
        debug!("Bind {} to provider `{}`", key, method.name());
        let binding = Binding::from_factory(*key.ty(), method.factory().clone(), method.scope());
        self.insert(key, binding, origin);
    }

    fn insert(&mut self, key: DependencyKey, binding: Binding, origin: Option<&'static str>) {
        let previous_origin = match origin {
            Some(origin) => self.origins.insert(key.clone(), origin),
            None => None,
        };
        if self.mappings.insert(key.clone(), binding).is_some() {
            match (previous_origin, origin) {
                (Some(previous), Some(current)) if previous != current => {
                    warn!("Binding for {} from {} overridden by {}", key, previous, current);
                }
                _ => debug!("Binding for {} overridden", key),
            }
        }
    }

    fn finish(self) -> BindingTable {
        BindingTable {
            mappings: self.mappings,
            implicit_scope: Scope::Singleton,
        }
    }
}
