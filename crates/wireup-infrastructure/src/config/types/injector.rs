//! Resolution engine configuration types

use crate::constants::DEFAULT_MAX_RESOLUTION_DEPTH;
use serde::{Deserialize, Serialize};
use wireup_domain::Scope;

/// Resolution engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectorConfig {
    /// Scope of the implicit self-binding used for unregistered types
    pub implicit_scope: Scope,

    /// Longest dependency chain a single request may walk
    pub max_resolution_depth: usize,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            implicit_scope: Scope::Singleton,
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}
