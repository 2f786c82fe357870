//! Domain Port Interfaces
//!
//! Contracts between the resolution engine and the code it wires:
//!
//! - **introspection** - how a concrete type or factory describes its
//!   parameters ([`TypeIntrospector`], [`Injectable`], [`Constructor`])
//! - **lazy** - deferred resolution handles ([`Provider`])

/// Type introspection contract and injectable types
pub mod introspection;
/// Deferred resolution handles
pub mod lazy;

pub use introspection::{
    Arguments, Constructor, Dependency, Injectable, Parameter, Requirement, TypeIntrospector,
};
pub use lazy::{DeferredHandle, LazyResolver, Provider};
