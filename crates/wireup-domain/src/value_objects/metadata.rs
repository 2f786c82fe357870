//! Construction metadata markers.
//!
//! Markers are attached to a construction entry point (an injectable type or
//! a factory) as an immutable value built up front:
//!
//! - [`named`](ConstructionMetadata::named): the qualifier the entry point is
//!   registered under;
//! - [`named_params`](ConstructionMetadata::named_params): per-parameter
//!   qualifiers used when resolving arguments;
//! - [`with_default`](ConstructionMetadata::with_default): literal arguments
//!   that pre-empt resolution of the parameter of the same name.
//!
//! The markers are independent. Applying both `named` and `named_params`
//! keeps both, whatever the order.

use std::collections::HashMap;

use super::Instance;

/// Named-instance, named-parameter and default-argument markers.
#[derive(Debug, Clone, Default)]
pub struct ConstructionMetadata {
    instance_name: Option<String>,
    param_qualifiers: HashMap<String, String>,
    defaults: Vec<(String, Instance)>,
}

impl ConstructionMetadata {
    /// Empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the entry point under `name`; a later call replaces it
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.instance_name = Some(name.into());
        self
    }

    /// Qualify parameters by name. Repeated calls merge, later entries win.
    pub fn named_params<I, P, Q>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (P, Q)>,
        P: Into<String>,
        Q: Into<String>,
    {
        self.param_qualifiers
            .extend(params.into_iter().map(|(p, q)| (p.into(), q.into())));
        self
    }

    /// Supply a literal argument for `param`
    pub fn with_default<T: Send + Sync + 'static>(self, param: impl Into<String>, value: T) -> Self {
        self.with_default_instance(param, Instance::from_value(value))
    }

    /// Supply an already wrapped argument for `param`
    pub fn with_default_instance(mut self, param: impl Into<String>, value: Instance) -> Self {
        self.defaults.push((param.into(), value));
        self
    }

    pub fn instance_name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    pub fn param_qualifiers(&self) -> &HashMap<String, String> {
        &self.param_qualifiers
    }

    pub fn defaults(&self) -> &[(String, Instance)] {
        &self.defaults
    }
}
