//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{InjectorConfig, LoggingConfig};

/// Root configuration document (`wireup.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Resolution engine settings
    #[serde(default)]
    pub injector: InjectorConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}
