//! Tests for binding table construction from modules

use std::sync::Arc;

use wireup_domain::{
    Adapter, BindingDeclaration, DependencyKey, Error, Factory, ProviderMethod, Scope, TypeKey,
};
use wireup_infrastructure::{BindingTable, Module};

use crate::test_utils::{
    AuditLogger, AuditOverrideModule, ConsoleLogger, Logger, LoggingModule, RequestContext,
    RequestModule,
};

#[test]
fn test_modules_register_their_declarations() {
    let modules: Vec<Arc<dyn Module>> = vec![Arc::new(LoggingModule), Arc::new(RequestModule)];
    let table = BindingTable::from_modules(&modules).unwrap();

    assert_eq!(table.len(), 3);
    assert!(table.contains(&DependencyKey::of::<dyn Logger>()));
    assert!(table.contains(&DependencyKey::named::<dyn Logger>("audit")));

    let request = table.lookup(&DependencyKey::of::<RequestContext>()).unwrap();
    assert_eq!(request.scope(), Scope::Unscoped);
}

#[test]
fn test_later_module_overrides_the_target() {
    let modules: Vec<Arc<dyn Module>> = vec![Arc::new(LoggingModule), Arc::new(AuditOverrideModule)];
    let table = BindingTable::from_modules(&modules).unwrap();

    let binding = table.lookup(&DependencyKey::of::<dyn Logger>()).unwrap();
    assert!(binding.target().is::<AuditLogger>());
    assert_eq!(table.len(), 2);
}

#[test]
fn test_build_applies_providers_after_declarations() {
    let key = DependencyKey::of::<dyn Logger>();
    let declaration = BindingDeclaration::new(
        key.clone(),
        TypeKey::constructible::<ConsoleLogger>(),
        Scope::Singleton,
        Some(Adapter::new::<dyn Logger, ConsoleLogger, _>(|c| c)),
    );
    let provider = ProviderMethod::new(
        "get_logger",
        Factory::new::<dyn Logger, _>(Vec::new(), |_| Ok(Arc::new(AuditLogger))),
    )
    .with_scope(Scope::Unscoped);

    let table = BindingTable::build([declaration], [(key.clone(), provider)]);
    let binding = table.lookup(&key).unwrap();

    assert!(binding.is_factory());
    assert_eq!(binding.scope(), Scope::Unscoped);
    assert_eq!(table.keys().count(), 1);
}

#[test]
fn test_qualified_miss_is_an_error() {
    let table = BindingTable::default();
    let err = table
        .lookup(&DependencyKey::named::<ConsoleLogger>("x"))
        .unwrap_err();
    assert!(matches!(err, Error::UnresolvedNamedBinding { .. }));
}

#[test]
fn test_empty_qualifier_is_not_the_absent_qualifier() {
    struct EmptyNamed;

    impl Module for EmptyNamed {
        fn configure(&self, binder: &mut wireup_infrastructure::Binder) {
            binder.bind::<ConsoleLogger>().named("").to_self();
        }
    }

    let table = BindingTable::from_modules(&[Arc::new(EmptyNamed) as Arc<dyn Module>]).unwrap();

    assert!(table.contains(&DependencyKey::named::<ConsoleLogger>("")));
    assert!(!table.contains(&DependencyKey::of::<ConsoleLogger>()));
}
