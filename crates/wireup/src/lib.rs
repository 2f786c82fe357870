//! # wireup
//!
//! A dependency injection resolution engine. Given a set of bindings and a
//! requested type, it builds the fully wired object graph: constructor
//! parameters are resolved recursively, singleton bindings are shared and
//! unscoped bindings are built fresh on every request.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wireup::{Arguments, Binder, Injectable, Module, Parameter, Result, interface};
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str);
//! }
//! interface!(Logger);
//!
//! struct ConsoleLogger;
//!
//! impl Logger for ConsoleLogger {
//!     fn log(&self, message: &str) {
//!         println!("{message}");
//!     }
//! }
//!
//! impl Injectable for ConsoleLogger {
//!     fn construct(_: &mut Arguments) -> Result<Self> {
//!         Ok(ConsoleLogger)
//!     }
//! }
//!
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
//!
//! struct AppModule;
//!
//! impl Module for AppModule {
//!     fn configure(&self, binder: &mut Binder) {
//!         binder.bind::<dyn Logger>().to::<ConsoleLogger, _>(|c| c);
//!     }
//! }
//!
//! let injector = wireup::create_injector([Arc::new(AppModule) as Arc<dyn Module>])?;
//! let service = injector.get_instance::<Service>()?;
//! service.logger.log("wired");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - keys, scopes, bindings, errors and the introspection ports
//! - `infrastructure` - binding table, resolution engine, configuration, logging

/// Domain layer - keys, bindings, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wireup_domain::*;
}

/// Infrastructure layer - DI engine, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wireup_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the `interface!` macro
pub use wireup_domain::interface;

// Re-export the engine entry points at the crate root
pub use infrastructure::config::{AppConfig, ConfigLoader, InjectorConfig, LoggingConfig};
pub use infrastructure::di::{
    Binder, BindingTable, Injector, InjectorBuilder, Module, ReflectiveIntrospector,
    create_injector,
};
pub use infrastructure::logging::init_logging;
