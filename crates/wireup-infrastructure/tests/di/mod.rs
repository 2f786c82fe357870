//! DI Layer Tests
//!
//! These tests validate:
//! - Singleton and unscoped resolution through the injector
//! - Qualified bindings, implicit self-bindings and module ordering
//! - Provider methods and lazy provider handles
//! - Cycle and depth detection
//! - Concurrent first access to singletons

mod injector_tests;
mod table_tests;
