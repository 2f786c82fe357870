//! Infrastructure layer constants
//!
//! Naming conventions of the binding table live in
//! `wireup_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wireup.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wireup";

/// Environment variable prefix for configuration (`WIREUP__SECTION__KEY`)
pub const CONFIG_ENV_PREFIX: &str = "WIREUP";

/// Separator between prefix, sections and keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// INJECTOR CONSTANTS
// ============================================================================

/// Maximum depth of a single resolution chain
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 256;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV_VAR: &str = "WIREUP_LOG";
