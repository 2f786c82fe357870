//! Lifetime scopes

use serde::{Deserialize, Serialize};
use std::fmt;

/// How long a resolved instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One instance per key, cached for the lifetime of the injector
    #[default]
    Singleton,
    /// A fresh instance on every request, never cached
    Unscoped,
}

impl Scope {
    /// Whether resolutions in this scope go through the instance cache
    pub fn is_cached(self) -> bool {
        matches!(self, Scope::Singleton)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Singleton => f.write_str("singleton"),
            Scope::Unscoped => f.write_str("unscoped"),
        }
    }
}
