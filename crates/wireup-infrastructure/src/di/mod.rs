//! Dependency Injection System
//!
//! Modules describe bindings, the binding table freezes them, and the
//! injector resolves object graphs against the table.
//!
//! ## Architecture Overview
//!
//! ```text
//! Module::configure ──► Binder ──► BindingDeclaration ─┐
//! Module::provider_methods ──► ProviderMethod ─────────┼──► BindingTable
//!                                                      │        │
//!                         TypeIntrospector ──► Injector ◄────────┘
//!                                                  │
//!                                       DashMap<DependencyKey, Instance>
//! ```
//!
//! ## Key Principles
//!
//! - **Trait-based DI**: interfaces are resolved as `Arc<dyn Trait>`
//! - **Immutable table**: the binding table is never mutated after build
//! - **Explicit introspection**: the engine only sees the
//!   [`TypeIntrospector`](wireup_domain::TypeIntrospector) contract

pub mod bootstrap;
pub mod injector;
pub mod introspection;
pub mod module;
pub mod table;

pub use bootstrap::{InjectorBuilder, create_injector};
pub use injector::Injector;
pub use introspection::ReflectiveIntrospector;
pub use module::{Binder, BindingBuilder, Module, ScopedBinding};
pub use table::BindingTable;
