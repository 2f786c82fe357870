//! # Infrastructure Layer
//!
//! The resolution engine and its cross-cutting concerns.
//!
//! ## Module Categories
//!
//! ### Dependency Injection
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Binder DSL, binding table, resolution engine, bootstrap |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration (TOML + environment) |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use di::{Binder, BindingTable, Injector, InjectorBuilder, Module, create_injector};
pub use error_ext::ErrorContext;
