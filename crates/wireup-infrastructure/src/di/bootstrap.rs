//! Injector bootstrap
//!
//! Composition root: modules + configuration + introspector -> [`Injector`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Defaults: singleton implicit bindings, blueprint introspection
//! let injector = create_injector(vec![Arc::new(AppModule) as Arc<dyn Module>])?;
//!
//! // Configured
//! let config = ConfigLoader::new().load()?;
//! let injector = InjectorBuilder::new()
//!     .with_config(config.injector)
//!     .add_module(AppModule)
//!     .build()?;
//! ```

use std::sync::Arc;

use tracing::info;
use wireup_domain::TypeIntrospector;
use wireup_domain::error::{Error, Result};

use super::injector::Injector;
use super::introspection::ReflectiveIntrospector;
use super::module::Module;
use super::table::BindingTable;
use crate::config::InjectorConfig;

/// Builder for [`Injector`]
pub struct InjectorBuilder {
    config: InjectorConfig,
    modules: Vec<Arc<dyn Module>>,
    introspector: Arc<dyn TypeIntrospector>,
}

impl InjectorBuilder {
    pub fn new() -> Self {
        Self {
            config: InjectorConfig::default(),
            modules: Vec::new(),
            introspector: Arc::new(ReflectiveIntrospector::new()),
        }
    }

    pub fn with_config(mut self, config: InjectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a module; later modules override earlier ones on shared keys
    pub fn add_module<M: Module + 'static>(mut self, module: M) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    pub fn add_shared_module(mut self, module: Arc<dyn Module>) -> Self {
        self.modules.push(module);
        self
    }

    /// Replace the default [`ReflectiveIntrospector`]
    pub fn with_introspector(mut self, introspector: Arc<dyn TypeIntrospector>) -> Self {
        self.introspector = introspector;
        self
    }

    /// Build the binding table and the injector
    pub fn build(self) -> Result<Injector> {
        if self.config.max_resolution_depth == 0 {
            return Err(Error::configuration(
                "Injector max_resolution_depth must be greater than 0",
            ));
        }

        let table = BindingTable::from_modules_with(&self.modules, self.introspector.as_ref())?
            .with_implicit_scope(self.config.implicit_scope);

        info!(
            "Injector built: {} module(s), {} binding(s), implicit scope {}",
            self.modules.len(),
            table.len(),
            table.implicit_scope()
        );

        Ok(Injector::new(
            table,
            self.introspector,
            self.config.max_resolution_depth,
        ))
    }
}

impl Default for InjectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an injector from modules with default settings
pub fn create_injector<I>(modules: I) -> Result<Injector>
where
    I: IntoIterator<Item = Arc<dyn Module>>,
{
    modules
        .into_iter()
        .fold(InjectorBuilder::new(), InjectorBuilder::add_shared_module)
        .build()
}
