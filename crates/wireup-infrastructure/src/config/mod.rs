//! Configuration
//!
//! Layered configuration loaded through Figment: defaults, then an optional
//! TOML file, then `WIREUP__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, InjectorConfig, LoggingConfig};
