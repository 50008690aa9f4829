//! # Bindery
//!
//! A dependency binding graph and resolution engine: discovers declared
//! component dependencies, builds a directed graph keyed by typed
//! identity, detects and reports dependency cycles with human-readable
//! paths, resolves competing providers per key by priority, and drives
//! registration order via a breadth-first visitor that tolerates
//! singleton cycles and rejects prototype cycles.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use bindery::domain::{
//!     ComponentKey, ComponentRegistration, DeclarationSource, ManualIntrospector,
//!     TypeMetadata,
//! };
//! use bindery::resolver::DependencyGraphInitializer;
//!
//! struct Clock;
//!
//! let introspector = Arc::new(ManualIntrospector::new());
//! introspector.register(
//!     TypeMetadata::of::<Clock>()
//!         .constructor(vec![], Arc::new(|_| Ok(Arc::new(Clock)))),
//! );
//!
//! let initializer = DependencyGraphInitializer::standard(introspector);
//! let sources = vec![DeclarationSource::from(
//!     ComponentRegistration::of::<Clock>().singleton(),
//! )];
//! let (registry, report) = initializer.initialize(&sources).expect("pass should wire");
//! assert!(report.is_complete());
//! let clock = registry
//!     .get_instance::<Clock>(&ComponentKey::of::<Clock>())
//!     .expect("clock should resolve");
//! let again = registry
//!     .get_instance::<Clock>(&ComponentKey::of::<Clock>())
//!     .expect("clock should resolve again");
//! assert!(Arc::ptr_eq(&clock, &again));
//! ```
//!
//! ## Architecture
//!
//! - `domain`: keys, contexts, providers, containers, ports, errors
//! - `resolver`: resolvers, graph traversal, hierarchies, registry

/// Domain layer - keys, contexts, providers, and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use bindery_domain::*;
}

/// Resolution engine - resolvers, graph, hierarchies, and registry
///
/// Re-exports from the resolver crate for convenience
pub mod resolver {
    pub use bindery_resolver::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::{
    Binder, ComponentKey, DependencyContext, Error, LifecycleType, ObjectContainer, Provider,
    Result, SelectionStrategy, TypeRef,
};

// Re-export the engine entry points at the crate root
pub use resolver::{BindingRegistry, DependencyGraphInitializer};
