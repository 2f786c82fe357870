//! Domain Value Objects
//!
//! Immutable values exchanged between the binding table, the resolution
//! engine and the introspection layer.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeKey`] | Runtime type identity, optionally carrying a constructor blueprint |
//! | [`DependencyKey`] | Type plus optional qualifier; binding and cache key |
//! | [`Scope`] | Lifetime of a resolved instance |
//! | [`Instance`] | Type-erased shared value produced by the engine |
//! | [`Binding`] | What a key resolves to: target type, scope, factory, adapter |
//! | [`BindingDeclaration`] | A single `bind` call recorded by a module |
//! | [`Factory`] | Callable alternative to direct construction |
//! | [`ConstructionMetadata`] | Named-instance, named-parameter and default-argument markers |

/// Bindings, declarations, factories and provider methods
pub mod binding;
/// Type-erased instances
pub mod instance;
/// Type and dependency keys
pub mod key;
/// Construction metadata markers
pub mod metadata;
/// Lifetime scopes
pub mod scope;

pub use binding::{Adapter, Binding, BindingDeclaration, Factory, ProviderMethod};
pub use instance::Instance;
pub use key::{Blueprint, DependencyKey, TypeKey};
pub use metadata::ConstructionMetadata;
pub use scope::Scope;
