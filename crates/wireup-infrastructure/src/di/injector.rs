//! Resolution engine
//!
//! Resolves a [`DependencyKey`] against the [`BindingTable`], builds the
//! concrete type through the [`TypeIntrospector`] and caches singleton
//! results.
//!
//! ## Resolution
//!
//! ```text
//! resolve(key)
//!   ├─ table.lookup(key)            UnresolvedNamedBinding on a qualified miss
//!   ├─ singleton and cached?        return the cached instance
//!   ├─ stack.enter(key)             CyclicDependency / ResolutionDepthExceeded
//!   ├─ construct(binding)           parameters resolved recursively, in order
//!   └─ cache if singleton
//! ```
//!
//! Keys under construction are tracked per thread and per engine. A lazy
//! provider used while its owner is still being built joins that chain, so a
//! constructor that eagerly pulls a deferred dependency which needs the
//! constructor's own type fails with a cycle instead of recursing. A provider
//! used after construction finished starts a fresh chain.
//!
//! The check-then-insert on the cache is not atomic. Two threads asking for
//! the same singleton for the first time may both build it; the last insert
//! wins and both callers keep the instance they built. The cache itself is a
//! `DashMap` and no guard is held while constructing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tracing::{debug, trace};
use wireup_domain::constants::DEPENDENCY_PATH_SEPARATOR;
use wireup_domain::error::{Error, Result};
use wireup_domain::{
    Arguments, Binding, DeferredHandle, Dependency, DependencyKey, Factory, Instance,
    LazyResolver, Parameter, Provider, Requirement, TypeIntrospector, TypeKey,
};

use super::table::BindingTable;

thread_local! {
    /// Resolution chains running on this thread, keyed by engine address
    static ACTIVE_STACKS: RefCell<HashMap<usize, ResolutionStack>> = RefCell::new(HashMap::new());
}

/// Builds object graphs from a binding table.
///
/// Cheap to clone; clones share the binding table and the singleton cache.
#[derive(Clone)]
pub struct Injector {
    engine: Arc<Engine>,
}

impl Injector {
    /// Create an injector over a built table
    pub fn new(
        table: BindingTable,
        introspector: Arc<dyn TypeIntrospector>,
        max_depth: usize,
    ) -> Self {
        let engine = Arc::new_cyclic(|weak_self| Engine {
            table,
            introspector,
            cache: DashMap::new(),
            max_depth,
            weak_self: weak_self.clone(),
        });
        Self { engine }
    }

    /// Resolve the unqualified binding of `T`
    pub fn get_instance<T: ?Sized + Dependency>(&self) -> Result<Arc<T>> {
        self.get_instance_with::<T>(None)
    }

    /// Resolve the binding of `T` registered under `name`
    pub fn get_named<T: ?Sized + Dependency>(&self, name: &str) -> Result<Arc<T>> {
        self.get_instance_with::<T>(Some(name))
    }

    /// Resolve `T` with an optional qualifier
    pub fn get_instance_with<T: ?Sized + Dependency>(
        &self,
        qualifier: Option<&str>,
    ) -> Result<Arc<T>> {
        let key = DependencyKey::new(T::type_key(), qualifier.map(str::to_owned));
        let instance = self.resolve_key(&key)?;
        instance.downcast::<T>().ok_or_else(|| {
            Error::construction(
                key.ty().name(),
                format!("binding for {key} produced an instance of {}", instance.type_name()),
            )
        })
    }

    /// Resolve a key to its type-erased instance
    pub fn resolve_key(&self, key: &DependencyKey) -> Result<Instance> {
        self.engine.resolve(key)
    }

    /// Lazy handle resolving `T` on each `get`
    pub fn provider<T: ?Sized + Dependency>(&self) -> Provider<T> {
        Provider::new(self.engine.resolver())
    }

    /// The binding table this injector resolves against
    pub fn bindings(&self) -> &BindingTable {
        &self.engine.table
    }

    /// Number of singleton instances built so far
    pub fn cached_instances(&self) -> usize {
        self.engine.cache.len()
    }

    /// Whether a singleton for `key` has been built
    pub fn is_cached(&self, key: &DependencyKey) -> bool {
        self.engine.cache.contains_key(key)
    }

    /// Maximum depth of a single resolution chain
    pub fn max_resolution_depth(&self) -> usize {
        self.engine.max_depth
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("bindings", &self.engine.table.len())
            .field("cached_instances", &self.engine.cache.len())
            .field("max_depth", &self.engine.max_depth)
            .finish()
    }
}

struct Engine {
    table: BindingTable,
    introspector: Arc<dyn TypeIntrospector>,
    cache: DashMap<DependencyKey, Instance>,
    max_depth: usize,
    weak_self: Weak<Engine>,
}

impl Engine {
    fn resolver(&self) -> Weak<dyn LazyResolver> {
        self.weak_self.clone()
    }

    fn id(&self) -> usize {
        std::ptr::from_ref(self).addr()
    }

    fn resolve(&self, key: &DependencyKey) -> Result<Instance> {
        let binding = self.table.lookup(key)?;
        let cached = binding.scope().is_cached();

        if cached && let Some(hit) = self.cache.get(key).map(|entry| entry.value().clone()) {
            trace!("Cache hit for {}", key);
            return Ok(hit);
        }

        let frame = ActiveFrame::enter(self.id(), self.max_depth, key)?;
        trace!("Resolving {} at depth {}", key, frame.depth);
        let built = self.construct(&binding);
        drop(frame);
        let instance = built?;

        if cached {
            debug!("Caching singleton {}", key);
            self.cache.insert(key.clone(), instance.clone());
        }
        Ok(instance)
    }

    fn construct(&self, binding: &Binding) -> Result<Instance> {
        let plan = self.plan(binding)?;
        trace!(
            "Constructing {} [{}] with {} parameter(s)",
            plan.target,
            plan.instance_name.as_deref().unwrap_or("-"),
            plan.requirements.len()
        );

        let mut args = Arguments::new();
        for (param, value) in plan.defaults {
            args.insert(param, value);
        }

        for (param, requirement) in plan.requirements {
            if args.contains(&param) {
                trace!("Parameter `{}` of {} supplied by default", param, plan.target);
                continue;
            }
            let value = match requirement {
                ResolvedRequirement::Direct(key) => self
                    .resolve(&key)
                    .map_err(|e| Error::dependency(plan.target.name(), &param, &key, e))?,
                ResolvedRequirement::Deferred(ty) => {
                    Instance::new(Arc::new(DeferredHandle::new(self.resolver(), ty)))
                }
            };
            args.insert(param, value);
        }

        let instance = match plan.strategy {
            Strategy::Constructor => self.introspector.invoke_constructor(&plan.target, &mut args),
            Strategy::Factory(factory) => factory.invoke(&mut args),
        }?;

        match binding.adapter() {
            Some(adapter) => adapter.apply(instance),
            None => Ok(instance),
        }
    }

    fn plan<'b>(&self, binding: &'b Binding) -> Result<ResolvedPlan<'b>> {
        let target = *binding.target();
        match binding.factory() {
            Some(factory) => {
                let metadata = self.introspector.factory_metadata(factory);
                let parameters = self.introspector.factory_requirements(factory);
                Ok(ResolvedPlan {
                    target,
                    strategy: Strategy::Factory(factory),
                    requirements: requirements(&target, &parameters, metadata.param_qualifiers()),
                    defaults: metadata.defaults().to_vec(),
                    instance_name: metadata.instance_name().map(str::to_owned),
                })
            }
            None => {
                let parameters = self.introspector.constructor_requirements(&target)?;
                let qualifiers = self.introspector.parameter_qualifiers(&target);
                Ok(ResolvedPlan {
                    target,
                    strategy: Strategy::Constructor,
                    requirements: requirements(&target, &parameters, &qualifiers),
                    defaults: self.introspector.default_arguments(&target),
                    instance_name: self.introspector.declared_instance_name(&target),
                })
            }
        }
    }
}

impl LazyResolver for Engine {
    fn resolve_key(&self, key: &DependencyKey) -> Result<Instance> {
        self.resolve(key)
    }
}

/// How the concrete value is produced
enum Strategy<'b> {
    Constructor,
    Factory(&'b Factory),
}

enum ResolvedRequirement {
    Direct(DependencyKey),
    /// The qualifier is chosen when the provider handle is used
    Deferred(TypeKey),
}

/// Everything needed to build one concrete value
struct ResolvedPlan<'b> {
    target: TypeKey,
    strategy: Strategy<'b>,
    requirements: Vec<(String, ResolvedRequirement)>,
    defaults: Vec<(String, Instance)>,
    instance_name: Option<String>,
}

fn requirements(
    owner: &TypeKey,
    parameters: &[Parameter],
    qualifiers: &HashMap<String, String>,
) -> Vec<(String, ResolvedRequirement)> {
    parameters
        .iter()
        .filter_map(|parameter| {
            let name = parameter.name();
            let requirement = match parameter.requirement() {
                Some(Requirement::Direct(ty)) => {
                    ResolvedRequirement::Direct(DependencyKey::new(ty, qualifiers.get(name).cloned()))
                }
                Some(Requirement::Deferred(ty)) => ResolvedRequirement::Deferred(ty),
                None => {
                    trace!("Parameter `{}` of {} has no type information, omitted", name, owner);
                    return None;
                }
            };
            Some((name.to_string(), requirement))
        })
        .collect()
}

/// Membership of one key in this thread's chain for an engine; leaves the
/// chain when dropped, including on unwind
struct ActiveFrame {
    engine: usize,
    depth: usize,
}

impl ActiveFrame {
    fn enter(engine: usize, limit: usize, key: &DependencyKey) -> Result<Self> {
        ACTIVE_STACKS.with_borrow_mut(|stacks| {
            let stack = stacks
                .entry(engine)
                .or_insert_with(|| ResolutionStack::new(limit));
            match stack.enter(key) {
                Ok(()) => Ok(Self {
                    engine,
                    depth: stack.depth(),
                }),
                Err(e) => {
                    if stack.depth() == 0 {
                        stacks.remove(&engine);
                    }
                    Err(e)
                }
            }
        })
    }
}

impl Drop for ActiveFrame {
    fn drop(&mut self) {
        ACTIVE_STACKS.with_borrow_mut(|stacks| {
            if let Some(stack) = stacks.get_mut(&self.engine) {
                stack.exit();
                if stack.depth() == 0 {
                    stacks.remove(&self.engine);
                }
            }
        });
    }
}

/// Keys currently being constructed within one resolution chain
struct ResolutionStack {
    path: Vec<DependencyKey>,
    limit: usize,
}

impl ResolutionStack {
    fn new(limit: usize) -> Self {
        Self {
            path: Vec::new(),
            limit,
        }
    }

    fn enter(&mut self, key: &DependencyKey) -> Result<()> {
        if let Some(start) = self.path.iter().position(|entry| entry == key) {
            let cycle = self.path[start..]
                .iter()
                .chain(std::iter::once(key))
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(DEPENDENCY_PATH_SEPARATOR);
            return Err(Error::cyclic(cycle));
        }
        if self.path.len() >= self.limit {
            return Err(Error::depth_exceeded(key, self.limit));
        }
        self.path.push(key.clone());
        Ok(())
    }

    fn exit(&mut self) {
        self.path.pop();
    }

    fn depth(&self) -> usize {
        self.path.len()
    }
}
