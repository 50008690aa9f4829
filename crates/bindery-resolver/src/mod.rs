//! # Bindery Resolution Engine
//!
//! Turns declaration sources into a wired binding registry:
//!
//! ```text
//! declaration sources
//!        ↓  resolvers (managed components, binding methods)
//! dependency contexts
//!        ↓  graph builder
//! dependency graph
//!        ↓  breadth-first configuration visitor
//! binding registry (hierarchies of providers per key)
//!        ↓  provision (constructor resolution, selection strategies)
//! object containers
//! ```
//!
//! ## Module Categories
//!
//! ### Resolution
//! | Module | Description |
//! |--------|-------------|
//! | [`resolver`] | Declaration-to-context resolvers and the composite |
//! | [`constructor`] | Optimal constructor selection with a process-wide cache |
//!
//! ### Graph
//! | Module | Description |
//! |--------|-------------|
//! | [`graph`] | Dependency graph, builder, traversal, and validation |
//!
//! ### Binding & Provision
//! | Module | Description |
//! |--------|-------------|
//! | [`hierarchy`] | Per-key provider hierarchies and selection strategies |
//! | [`registry`] | Binding registry: binder, provision scope, singleton cache |
//! | [`bootstrap`] | One-pass graph initializer wiring it all together |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod constructor;
pub mod graph;
pub mod hierarchy;
pub mod logging;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use bootstrap::DependencyGraphInitializer;
pub use constructor::ConstructorResolver;
pub use graph::{
    BindingLookup, ConfigurationVisitor, DependencyGraph, DependencyGraphBuilder, GraphNode,
    GraphValidator, GraphVisitor, NodeId,
};
pub use hierarchy::BindingHierarchy;
pub use registry::BindingRegistry;
pub use resolver::{
    BindsMethodResolver, CompositeDependencyResolver, DependencyResolver,
    ManagedComponentResolver,
};
