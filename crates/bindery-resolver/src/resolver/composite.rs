//! Composite resolver fanning out to child resolvers

use super::DependencyResolver;
use bindery_domain::declaration::DeclarationSource;
use bindery_domain::dependency::DependencyContext;
use bindery_domain::error::Result;
use bindery_domain::key::ComponentKey;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Fans out to child resolvers and unions their outputs.
///
/// Union has set semantics over `(key, priority)`: two resolvers
/// discovering the same binding contribute one context. A resolution
/// failure in any child propagates; there is no partial silent failure.
#[derive(Default)]
pub struct CompositeDependencyResolver {
    children: Vec<Arc<dyn DependencyResolver>>,
}

impl CompositeDependencyResolver {
    /// Composite over the given children
    pub fn new(children: Vec<Arc<dyn DependencyResolver>>) -> Self {
        Self { children }
    }

    /// Append a child resolver
    pub fn with(mut self, child: Arc<dyn DependencyResolver>) -> Self {
        self.children.push(child);
        self
    }
}

impl DependencyResolver for CompositeDependencyResolver {
    fn resolve(&self, sources: &[DeclarationSource]) -> Result<Vec<Arc<dyn DependencyContext>>> {
        let mut seen: HashSet<(ComponentKey, i32)> = HashSet::new();
        let mut contexts: Vec<Arc<dyn DependencyContext>> = Vec::new();
        for child in &self.children {
            for context in child.resolve(sources)? {
                let identity = (context.key().clone(), context.priority());
                if seen.insert(identity) {
                    contexts.push(context);
                }
            }
        }
        debug!(contexts = contexts.len(), "composite resolution complete");
        Ok(contexts)
    }
}
