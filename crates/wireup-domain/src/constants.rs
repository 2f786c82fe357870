//! Domain layer constants
//!
//! Naming conventions understood by the binding table. Infrastructure
//! defaults (config file names, depth limits) live in
//! `wireup_infrastructure::constants`.

/// Module methods whose name starts with this prefix are registered as
/// factory bindings keyed by their return type.
pub const PROVIDER_METHOD_PREFIX: &str = "get";

/// Separator used when rendering a dependency chain in error messages
pub const DEPENDENCY_PATH_SEPARATOR: &str = " -> ";
