//! Tests for the resolution engine

use std::sync::Arc;

use wireup_domain::{DependencyKey, Error, Scope};
use wireup_infrastructure::config::InjectorConfig;
use wireup_infrastructure::{InjectorBuilder, Module, create_injector};

use crate::test_utils::{
    AuditOverrideModule, AuditedService, Broken, Clock, DEFAULT_TIMEOUT_SECS, FeatureFlags,
    HttpClient, Logger, LoggingModule, NeedsBroken, RequestContext, RequestModule, Service,
};

fn modules(list: Vec<Arc<dyn Module>>) -> wireup_infrastructure::Injector {
    create_injector(list).expect("injector should build")
}

#[test]
fn test_singleton_is_resolved_once() {
    let injector = modules(vec![Arc::new(LoggingModule)]);

    let first = injector.get_instance::<dyn Logger>().unwrap();
    let second = injector.get_instance::<dyn Logger>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.kind(), "console");
    assert_eq!(injector.cached_instances(), 1);
}

#[test]
fn test_unscoped_is_fresh_but_shares_singleton_dependencies() {
    let injector = modules(vec![Arc::new(LoggingModule), Arc::new(RequestModule)]);

    let first = injector.get_instance::<RequestContext>().unwrap();
    let second = injector.get_instance::<RequestContext>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_ne!(first.id, second.id);
    assert!(Arc::ptr_eq(&first.logger, &second.logger));
    assert!(!injector.is_cached(&DependencyKey::of::<RequestContext>()));
}

#[test]
fn test_qualified_bindings_are_distinct() {
    let injector = modules(vec![Arc::new(LoggingModule)]);

    let plain = injector.get_instance::<dyn Logger>().unwrap();
    let audit = injector.get_named::<dyn Logger>("audit").unwrap();

    assert_eq!(plain.kind(), "console");
    assert_eq!(audit.kind(), "audit");
    assert!(!Arc::ptr_eq(&plain, &audit));
}

#[test]
fn test_unbound_type_is_self_bound_as_singleton() {
    let injector = modules(Vec::new());

    let first = injector.get_instance::<Clock>().unwrap();
    let second = injector.get_instance::<Clock>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(injector.bindings().is_empty());
}

#[test]
fn test_implicit_scope_follows_configuration() {
    let injector = InjectorBuilder::new()
        .with_config(InjectorConfig {
            implicit_scope: Scope::Unscoped,
            ..InjectorConfig::default()
        })
        .build()
        .unwrap();

    let first = injector.get_instance::<Clock>().unwrap();
    let second = injector.get_instance::<Clock>().unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(injector.cached_instances(), 0);
}

#[test]
fn test_unbound_qualifier_fails_without_fallback() {
    let injector = modules(vec![Arc::new(LoggingModule)]);

    let Err(err) = injector.get_named::<dyn Logger>("missing") else {
        panic!("resolution should fail");
    };
    assert!(matches!(err, Error::UnresolvedNamedBinding { .. }));

    // A qualifier on a self-bindable type does not fall back either
    let Err(err) = injector.get_named::<Clock>("wall") else {
        panic!("resolution should fail");
    };
    assert!(matches!(err, Error::UnresolvedNamedBinding { .. }));
}

#[test]
fn test_interface_without_binding_cannot_be_built() {
    let injector = modules(Vec::new());

    let Err(err) = injector.get_instance::<dyn Logger>() else {
        panic!("resolution should fail");
    };
    assert!(matches!(err, Error::Construction { .. }));
    assert!(err.to_string().contains("no accessible constructor"));
}

#[test]
fn test_later_module_wins() {
    let injector = modules(vec![Arc::new(LoggingModule), Arc::new(AuditOverrideModule)]);
    assert_eq!(injector.get_instance::<dyn Logger>().unwrap().kind(), "audit");

    let injector = modules(vec![Arc::new(AuditOverrideModule), Arc::new(LoggingModule)]);
    assert_eq!(injector.get_instance::<dyn Logger>().unwrap().kind(), "console");
}

#[test]
fn test_service_shares_the_bound_logger() {
    let injector = modules(vec![Arc::new(LoggingModule)]);

    let service = injector.get_instance::<Service>().unwrap();
    let logger = injector.get_instance::<dyn Logger>().unwrap();

    assert!(Arc::ptr_eq(&service.logger, &logger));
    service.logger.log("wired");
}

#[test]
fn test_named_params_select_the_qualified_binding() {
    let injector = modules(vec![Arc::new(LoggingModule)]);

    let service = injector.get_instance::<AuditedService>().unwrap();
    let audit = injector.get_named::<dyn Logger>("audit").unwrap();

    assert!(Arc::ptr_eq(&service.logger, &audit));
}

#[test]
fn test_defaults_win_over_resolution() {
    let injector = modules(vec![Arc::new(LoggingModule)]);

    let client = injector.get_instance::<HttpClient>().unwrap();

    assert_eq!(client.timeout, DEFAULT_TIMEOUT_SECS);
    assert_eq!(client.logger.kind(), "audit");
    // The bound logger was never requested
    assert!(!injector.is_cached(&DependencyKey::of::<dyn Logger>()));
}

#[test]
fn test_unannotated_parameter_is_omitted() {
    let injector = modules(Vec::new());
    let flags = injector.get_instance::<FeatureFlags>().unwrap();
    assert!(flags.overrides.is_none());
}

#[test]
fn test_failed_construction_is_not_cached() {
    let injector = modules(Vec::new());

    assert!(injector.get_instance::<Broken>().is_err());
    assert!(injector.get_instance::<Broken>().is_err());
    assert_eq!(injector.cached_instances(), 0);
}

#[test]
fn test_dependency_failure_names_the_parameter() {
    let injector = modules(Vec::new());

    let Err(err) = injector.get_instance::<NeedsBroken>() else {
        panic!("resolution should fail");
    };
    let message = err.to_string();

    assert!(message.contains("NeedsBroken"));
    assert!(message.contains("`broken`"));
    assert!(matches!(
        err.root_cause(),
        Error::Construction { message, .. } if message == "refuses to start"
    ));
}

#[test]
fn test_nested_unresolved_name_is_wrapped() {
    let injector = InjectorBuilder::new().build().unwrap();

    // AuditedService asks for `dyn Logger [audit]`, which is not bound here
    let Err(err) = injector.get_instance::<AuditedService>() else {
        panic!("resolution should fail");
    };
    assert!(matches!(err, Error::Construction { .. }));
    assert!(err.is_unresolved_named());
}

#[test]
fn test_clones_share_the_cache() {
    let injector = modules(vec![Arc::new(LoggingModule)]);
    let clone = injector.clone();

    let from_original = injector.get_instance::<dyn Logger>().unwrap();
    let from_clone = clone.get_instance::<dyn Logger>().unwrap();

    assert!(Arc::ptr_eq(&from_original, &from_clone));
}
