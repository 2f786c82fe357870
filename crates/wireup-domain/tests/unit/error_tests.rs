//! Unit tests for the error taxonomy

use wireup_domain::{DependencyKey, Error, TypeKey};

#[test]
fn test_unresolved_named_message_names_the_key() {
    let key = DependencyKey::new(TypeKey::of::<String>(), Some("db".to_string()));
    let err = Error::unresolved_named(&key);

    assert!(err.to_string().contains("String [db]"));
    assert!(err.is_unresolved_named());
    assert!(!err.is_cyclic());
}

#[test]
fn test_root_cause_walks_nested_dependencies() {
    let missing = DependencyKey::new(TypeKey::of::<u8>(), Some("port".to_string()));
    let inner = Error::unresolved_named(&missing);
    let middle = Error::dependency("Server", "port", &missing, inner);
    let outer = Error::dependency(
        "App",
        "server",
        &DependencyKey::new(TypeKey::of::<String>(), None),
        middle,
    );

    assert!(matches!(outer, Error::Construction { .. }));
    assert!(outer.to_string().contains("App"));
    assert!(matches!(outer.root_cause(), Error::UnresolvedNamedBinding { .. }));
    assert!(outer.is_unresolved_named());
}

#[test]
fn test_root_cause_of_a_leaf_is_itself() {
    let err = Error::construction("Widget", "no accessible constructor");
    assert!(matches!(
        err.root_cause(),
        Error::Construction { message, .. } if message == "no accessible constructor"
    ));
}

#[test]
fn test_cyclic_error_is_detected_through_wrappers() {
    let key = DependencyKey::new(TypeKey::of::<u16>(), None);
    let err = Error::dependency("A", "b", &key, Error::cyclic("A -> B -> A"));

    assert!(err.is_cyclic());
    assert!(err.root_cause().to_string().contains("A -> B -> A"));
}

#[test]
fn test_configuration_error_keeps_its_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = Error::configuration_with_source("cannot read", io);

    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("gone"));
}
