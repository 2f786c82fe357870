//! Binding declaration DSL.
//!
//! A [`Module`] records its bindings into a [`Binder`]:
//!
//! ```ignore
//! struct LoggingModule;
//!
//! impl Module for LoggingModule {
//!     fn configure(&self, binder: &mut Binder) {
//!         binder.bind::<dyn Logger>().to::<ConsoleLogger, _>(|c| c);
//!         binder
//!             .bind::<dyn Logger>()
//!             .named("audit")
//!             .to::<FileLogger, _>(|c| c)
//!             .unscoped();
//!     }
//! }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use wireup_domain::{
    Adapter, BindingDeclaration, Dependency, DependencyKey, Injectable, ProviderMethod, Scope,
    TypeKey,
};

/// A source of binding declarations and provider methods
pub trait Module: Send + Sync {
    /// Record this module's bindings, in order
    fn configure(&self, binder: &mut Binder);

    /// Factory methods offered to the binding table.
    ///
    /// Only methods named with the `get` prefix are registered.
    fn provider_methods(&self) -> Vec<ProviderMethod> {
        Vec::new()
    }

    /// Name used in diagnostics
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Ordered collector of [`BindingDeclaration`]s
#[derive(Debug, Default)]
pub struct Binder {
    declarations: Vec<BindingDeclaration>,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a binding for the source type `S`
    pub fn bind<S: ?Sized + Dependency>(&mut self) -> BindingBuilder<'_, S> {
        BindingBuilder {
            binder: self,
            qualifier: None,
            _source: PhantomData,
        }
    }

    /// Record a prebuilt declaration
    pub fn declare(&mut self, declaration: BindingDeclaration) {
        self.declarations.push(declaration);
    }

    pub fn into_declarations(self) -> Vec<BindingDeclaration> {
        self.declarations
    }
}

/// Binding under construction: source type and optional qualifier
pub struct BindingBuilder<'a, S: ?Sized> {
    binder: &'a mut Binder,
    qualifier: Option<String>,
    _source: PhantomData<fn() -> Arc<S>>,
}

impl<'a, S: ?Sized + Dependency> BindingBuilder<'a, S> {
    /// Qualify the binding
    pub fn named(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Bind to the concrete type `C`; `upcast` turns `Arc<C>` into `Arc<S>`,
    /// usually `|c| c`
    pub fn to<C, F>(self, upcast: F) -> ScopedBinding<'a>
    where
        C: Injectable,
        F: Fn(Arc<C>) -> Arc<S> + Send + Sync + 'static,
    {
        let source = DependencyKey::new(S::type_key(), self.qualifier);
        let declaration = BindingDeclaration::new(
            source,
            TypeKey::constructible::<C>(),
            Scope::Singleton,
            Some(Adapter::new::<S, C, F>(upcast)),
        );
        ScopedBinding::new(self.binder, declaration)
    }
}

impl<'a, S: Injectable> BindingBuilder<'a, S> {
    /// Bind the type to itself, e.g. to give it a qualifier or a scope
    pub fn to_self(self) -> ScopedBinding<'a> {
        let source = DependencyKey::new(S::type_key(), self.qualifier);
        let declaration =
            BindingDeclaration::new(source, TypeKey::constructible::<S>(), Scope::Singleton, None);
        ScopedBinding::new(self.binder, declaration)
    }
}

/// A complete binding, recorded when dropped. Defaults to
/// [`Scope::Singleton`].
pub struct ScopedBinding<'a> {
    binder: &'a mut Binder,
    declaration: Option<BindingDeclaration>,
}

impl<'a> ScopedBinding<'a> {
    fn new(binder: &'a mut Binder, declaration: BindingDeclaration) -> Self {
        Self {
            binder,
            declaration: Some(declaration),
        }
    }

    pub fn in_scope(mut self, scope: Scope) {
        self.declaration = self
            .declaration
            .take()
            .map(|declaration| declaration.with_scope(scope));
    }

    /// Fresh instance on every request
    pub fn unscoped(self) {
        self.in_scope(Scope::Unscoped);
    }
}

impl Drop for ScopedBinding<'_> {
    fn drop(&mut self) {
        if let Some(declaration) = self.declaration.take() {
            self.binder.declare(declaration);
        }
    }
}
