//! # wireup domain layer
//!
//! Core vocabulary of the resolution engine: what a dependency *is*
//! ([`DependencyKey`]), how it is bound ([`Binding`], [`BindingDeclaration`],
//! [`Factory`]), how long it lives ([`Scope`]) and how a concrete type
//! describes its own construction ([`Injectable`], [`TypeIntrospector`]).
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Keys, scopes, bindings, metadata and type-erased instances |
//! | [`ports`] | Introspection contract, injectable types, lazy provider handles |
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`constants`] | Naming conventions recognised by the binding table |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{
    Arguments, Constructor, DeferredHandle, Dependency, Injectable, LazyResolver, Parameter,
    Provider, Requirement, TypeIntrospector,
};
pub use value_objects::{
    Adapter, Binding, BindingDeclaration, ConstructionMetadata, DependencyKey, Factory, Instance,
    ProviderMethod, Scope, TypeKey,
};

/// Implements [`Dependency`] for trait objects so they can be requested
/// from an injector and used as binding sources.
///
/// The trait must have `Send + Sync` as supertraits.
///
/// ```ignore
/// trait Logger: Send + Sync {
///     fn log(&self, message: &str);
/// }
/// wireup_domain::interface!(Logger);
/// ```
#[macro_export]
macro_rules! interface {
    ($($iface:ident),+ $(,)?) => {
        $(
            impl $crate::ports::Dependency for dyn $iface {
                fn type_key() -> $crate::value_objects::TypeKey {
                    $crate::value_objects::TypeKey::of::<dyn $iface>()
                }
            }
        )+
    };
}
