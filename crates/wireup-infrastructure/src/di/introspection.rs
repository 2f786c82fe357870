//! Default type introspector
//!
//! Reads the blueprints carried by [`TypeKey`]s of [`Injectable`] types.
//! Constructors registered explicitly take precedence, which also lets
//! types that do not implement `Injectable` be built.

use std::collections::HashMap;

use wireup_domain::error::{Error, Result};
use wireup_domain::{
    Arguments, Constructor, Injectable, Instance, Parameter, TypeIntrospector, TypeKey,
};

/// Blueprint-backed [`TypeIntrospector`] with optional registrations
#[derive(Debug, Clone, Default)]
pub struct ReflectiveIntrospector {
    registered: HashMap<TypeKey, Constructor>,
}

impl ReflectiveIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the blueprint of `T` explicitly
    pub fn register<T: Injectable>(self) -> Self {
        self.register_constructor(Constructor::of::<T>())
    }

    /// Register a constructor; replaces any previous one for the same type
    pub fn register_constructor(mut self, constructor: Constructor) -> Self {
        self.registered.insert(constructor.target(), constructor);
        self
    }

    /// Whether a constructor was registered for `ty`
    pub fn is_registered(&self, ty: &TypeKey) -> bool {
        self.registered.contains_key(ty)
    }

    fn constructor(&self, ty: &TypeKey) -> Result<Constructor> {
        if let Some(constructor) = self.registered.get(ty) {
            return Ok(constructor.clone());
        }
        ty.blueprint()
            .map(|blueprint| blueprint())
            .ok_or_else(|| Error::construction(ty.name(), "no accessible constructor"))
    }
}

impl TypeIntrospector for ReflectiveIntrospector {
    fn constructor_requirements(&self, ty: &TypeKey) -> Result<Vec<Parameter>> {
        Ok(self.constructor(ty)?.parameters().to_vec())
    }

    fn parameter_qualifiers(&self, ty: &TypeKey) -> HashMap<String, String> {
        self.constructor(ty)
            .map(|c| c.metadata().param_qualifiers().clone())
            .unwrap_or_default()
    }

    fn declared_instance_name(&self, ty: &TypeKey) -> Option<String> {
        self.constructor(ty)
            .ok()
            .and_then(|c| c.metadata().instance_name().map(str::to_owned))
    }

    fn default_arguments(&self, ty: &TypeKey) -> Vec<(String, Instance)> {
        self.constructor(ty)
            .map(|c| c.metadata().defaults().to_vec())
            .unwrap_or_default()
    }

    fn invoke_constructor(&self, ty: &TypeKey, args: &mut Arguments) -> Result<Instance> {
        self.constructor(ty)?.invoke(args)
    }
}
