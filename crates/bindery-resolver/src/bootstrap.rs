//! One-pass graph initializer
//!
//! Wires the pipeline end to end: declarations → resolvers → graph →
//! configuration visitor → binding registry. Resolution, configuration,
//! and cycle errors abort the whole pass: a half-wired container is
//! never returned. Missing (non-cyclic) dependencies are collected into
//! the validation report and logged, and the caller decides whether
//! absence is fatal.

use crate::constructor::ConstructorResolver;
use crate::graph::{ConfigurationVisitor, DependencyGraphBuilder, GraphValidator, traverse};
use crate::registry::BindingRegistry;
use crate::resolver::{
    BindsMethodResolver, CompositeDependencyResolver, DependencyResolver,
    ManagedComponentResolver,
};
use bindery_domain::declaration::DeclarationSource;
use bindery_domain::diagnostics::ValidationReport;
use bindery_domain::error::Result;
use bindery_domain::ports::introspection::Introspector;
use std::sync::Arc;
use tracing::{info, warn};

/// Drives one resolution pass from declaration sources to a wired
/// binding registry.
pub struct DependencyGraphInitializer {
    constructors: Arc<ConstructorResolver>,
    resolver: Arc<dyn DependencyResolver>,
}

impl DependencyGraphInitializer {
    /// Initializer with the standard resolver set: managed components
    /// and binding methods behind one composite, sharing the
    /// constructor cache with the registry.
    pub fn standard(introspector: Arc<dyn Introspector>) -> Self {
        let constructors = Arc::new(ConstructorResolver::new(introspector));
        let resolver = CompositeDependencyResolver::default()
            .with(Arc::new(ManagedComponentResolver::new(Arc::clone(
                &constructors,
            ))))
            .with(Arc::new(BindsMethodResolver::new()));
        Self {
            constructors,
            resolver: Arc::new(resolver),
        }
    }

    /// Initializer with a custom resolver
    pub fn new(constructors: Arc<ConstructorResolver>, resolver: Arc<dyn DependencyResolver>) -> Self {
        Self {
            constructors,
            resolver,
        }
    }

    /// Run one resolution pass.
    ///
    /// Returns the wired registry plus the validation report of
    /// dependencies no declaration provides.
    pub fn initialize(
        &self,
        sources: &[DeclarationSource],
    ) -> Result<(BindingRegistry, ValidationReport)> {
        info!(declarations = sources.len(), "resolving declaration sources");
        let contexts = self.resolver.resolve(sources)?;

        let graph = DependencyGraphBuilder::build(contexts);
        let registry = BindingRegistry::with_constructors(Arc::clone(&self.constructors));

        let visited = {
            let mut visitor = ConfigurationVisitor::new(&registry);
            traverse(&graph, &mut visitor)?
        };

        let report = GraphValidator::validate(&graph, &visited);
        for missing in &report.missing {
            warn!(dependency = %missing, "dependency not provided by any declaration");
        }
        info!(
            components = visited.len(),
            bindings = registry.len(),
            "binding pass complete"
        );
        Ok((registry, report))
    }
}
