//! Unit tests for resolved constructor arguments

use std::sync::Arc;

use wireup_domain::{Arguments, Error, Instance};

#[test]
fn test_first_writer_wins() {
    let mut args = Arguments::new();
    assert!(args.insert("port", Instance::from_value(8080_u16)));
    assert!(!args.insert("port", Instance::from_value(9090_u16)));

    assert_eq!(args.len(), 1);
    assert_eq!(args.value::<u16>("port").unwrap(), 8080);
    assert!(args.is_empty());
}

#[test]
fn test_take_returns_the_shared_value() {
    let shared = Arc::new(String::from("config"));
    let mut args = Arguments::new();
    args.insert("config", Instance::new(Arc::clone(&shared)));

    let taken = args.take::<String>("config").unwrap();
    assert!(Arc::ptr_eq(&shared, &taken));
}

#[test]
fn test_missing_argument_is_a_construction_error() {
    let mut args = Arguments::new();
    let err = args.take::<String>("absent").unwrap_err();

    assert!(matches!(err, Error::Construction { .. }));
    assert!(err.to_string().contains("absent"));
}

#[test]
fn test_mistyped_argument_is_a_construction_error() {
    let mut args = Arguments::new();
    args.insert("port", Instance::from_value("8080".to_string()));

    let err = args.take::<u16>("port").unwrap_err();
    assert!(matches!(err, Error::Construction { .. }));
}

#[test]
fn test_optional_argument() {
    let mut args = Arguments::new();
    assert!(args.optional::<u16>("port").unwrap().is_none());

    args.insert("port", Instance::from_value(1_u16));
    assert!(args.contains("port"));
    assert_eq!(args.optional::<u16>("port").unwrap().as_deref(), Some(&1));
}
