//! Declaration-to-context resolvers
//!
//! Pluggable strategies that turn declaration sources into dependency
//! contexts. The composite fans out to its children and unions the
//! results; the managed-component and binding-method resolvers cover
//! the two declaration kinds.

mod binds;
mod component;
mod composite;

pub use binds::BindsMethodResolver;
pub use component::ManagedComponentResolver;
pub use composite::CompositeDependencyResolver;

use bindery_domain::declaration::DeclarationSource;
use bindery_domain::dependency::DependencyContext;
use bindery_domain::error::Result;
use std::sync::Arc;

/// Turns declaration sources into dependency contexts.
///
/// A resolver may fail when a declaration cannot be turned into a
/// context (introspection failure, inconsistent dependency partitions);
/// any failure aborts the resolution pass, there is no partial output.
pub trait DependencyResolver: Send + Sync {
    /// Resolve all declarations this resolver understands
    fn resolve(&self, sources: &[DeclarationSource]) -> Result<Vec<Arc<dyn DependencyContext>>>;
}
