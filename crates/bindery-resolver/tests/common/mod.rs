//! Shared helpers for the resolver test suites

// Not every test binary uses every helper.
#![allow(dead_code)]

use bindery_domain::dependency::{DependencyContext, DependencyMap};
use bindery_domain::error::Result;
use bindery_domain::key::ComponentKey;
use bindery_domain::lifecycle::LifecycleType;
use bindery_domain::ports::binder::Binder;
use bindery_resolver::graph::{GraphNode, GraphVisitor};
use std::sync::Arc;

/// Minimal dependency context with a no-op `configure`.
pub struct StubContext {
    key: ComponentKey,
    dependencies: DependencyMap,
    priority: i32,
    lifecycle: LifecycleType,
}

impl StubContext {
    pub fn new(key: ComponentKey, lifecycle: LifecycleType) -> Self {
        Self {
            key,
            dependencies: DependencyMap::new(),
            priority: 0,
            lifecycle,
        }
    }

    pub fn with_dependencies(mut self, dependencies: DependencyMap) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn into_arc(self) -> Arc<dyn DependencyContext> {
        Arc::new(self)
    }
}

impl DependencyContext for StubContext {
    fn key(&self) -> &ComponentKey {
        &self.key
    }

    fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn lifecycle(&self) -> LifecycleType {
        self.lifecycle
    }

    fn is_lazy(&self) -> bool {
        false
    }

    fn configure(&self, _binder: &dyn Binder) -> Result<()> {
        Ok(())
    }
}

/// Visitor recording visit order, optionally stopping after a limit.
#[derive(Default)]
pub struct RecordingVisitor {
    pub visited: Vec<ComponentKey>,
    pub stop_after: Option<usize>,
}

impl RecordingVisitor {
    pub fn stopping_after(limit: usize) -> Self {
        Self {
            visited: Vec::new(),
            stop_after: Some(limit),
        }
    }
}

impl GraphVisitor for RecordingVisitor {
    fn visit(&mut self, node: &GraphNode) -> Result<bool> {
        self.visited.push(node.key().clone());
        Ok(match self.stop_after {
            Some(limit) => self.visited.len() < limit,
            None => true,
        })
    }
}
