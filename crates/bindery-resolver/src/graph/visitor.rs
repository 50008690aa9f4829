//! Graph traversal, configuration, and validation
//!
//! Breadth-first walk visiting each node at most once. The walk is an
//! explicit state machine: a `visit` callback returning whether to
//! continue, plus a satisfaction predicate deciding when a node may be
//! visited. The cycle tolerance rule lives in that predicate:
//!
//! - a node is visitable when all of its parents have been visited;
//! - a **singleton** node is additionally visitable as soon as all of
//!   its parents exist in the node set, visited or not: singletons are
//!   memoized after first construction, so circular singleton
//!   references resolve at runtime;
//! - a **prototype** node gets no such exemption: a full sweep that
//!   visits nothing while prototype nodes remain is a genuine cycle and
//!   raises [`Error::CyclicDependency`].

use super::{DependencyGraph, GraphNode, NodeId};
use crate::registry::BindingRegistry;
use bindery_domain::dependency::DependencyContext;
use bindery_domain::diagnostics::{CyclePath, DiscoveryEntry, ValidationReport};
use bindery_domain::error::{Error, Result};
use bindery_domain::key::ComponentKey;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Lookup used to annotate diagnostics with the concrete type an
/// explicit binding satisfies a key with.
pub trait BindingLookup {
    /// Simple name of the bound concrete type, when it differs from the
    /// key's own type
    fn implemented_by(&self, key: &ComponentKey) -> Option<String>;
}

/// Per-node callback driving a traversal.
pub trait GraphVisitor {
    /// Visit one node; returning `false` stops the walk
    fn visit(&mut self, node: &GraphNode) -> Result<bool>;

    /// Lookup for cycle diagnostics annotations
    fn binding_lookup(&self) -> Option<&dyn BindingLookup> {
        None
    }
}

/// Walk the graph breadth-first, visiting each node at most once.
///
/// Returns the set of visited nodes. Nodes whose parents never become
/// satisfiable because of a disallowed cycle raise
/// [`Error::CyclicDependency`] carrying the reconstructed cycle path.
pub fn traverse(
    graph: &DependencyGraph,
    visitor: &mut dyn GraphVisitor,
) -> Result<HashSet<NodeId>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut remaining: Vec<NodeId> = (0..graph.len()).collect();

    while !remaining.is_empty() {
        let mut deferred: Vec<NodeId> = Vec::new();
        let mut progressed = false;

        for &id in &remaining {
            let node = graph.node(id);
            if !satisfied(node, &visited) {
                deferred.push(id);
                continue;
            }
            trace!(component = %node.key(), "visiting graph node");
            let proceed = visitor.visit(node)?;
            visited.insert(id);
            progressed = true;
            if !proceed {
                debug!(component = %node.key(), "visitor stopped the traversal");
                return Ok(visited);
            }
        }

        if !progressed {
            let path = cycle_path(graph, deferred[0], &visited, visitor.binding_lookup());
            return Err(Error::CyclicDependency { path });
        }
        remaining = deferred;
    }

    Ok(visited)
}

/// The satisfaction predicate: `visited ⊇ parents(n)`, or `n` is a
/// singleton and all of its parents are present in the node set.
fn satisfied(node: &GraphNode, visited: &HashSet<NodeId>) -> bool {
    if node.parents().iter().all(|parent| visited.contains(parent)) {
        return true;
    }
    // Parent ids always refer to nodes in the arena, so presence in the
    // full node set holds by construction.
    node.is_singleton()
}

/// Reconstruct the discovery path closing a cycle: follow unvisited
/// parents from the stuck node until one repeats, then keep the cycle
/// slice.
fn cycle_path(
    graph: &DependencyGraph,
    start: NodeId,
    visited: &HashSet<NodeId>,
    lookup: Option<&dyn BindingLookup>,
) -> CyclePath {
    let mut sequence: Vec<NodeId> = vec![start];
    let mut current = start;
    loop {
        let next = graph
            .node(current)
            .parents()
            .iter()
            .find(|parent| !visited.contains(parent))
            .copied();
        let Some(next) = next else { break };
        if let Some(position) = sequence.iter().position(|&id| id == next) {
            sequence.drain(..position);
            break;
        }
        sequence.push(next);
        current = next;
    }

    CyclePath::from_entries(sequence.into_iter().map(|id| {
        let key = graph.node(id).key();
        let implemented_by = lookup.and_then(|l| l.implemented_by(key));
        match implemented_by {
            Some(actual) => {
                DiscoveryEntry::implemented_by(key.type_ref().simple_name(), actual)
            }
            None => DiscoveryEntry::new(key.type_ref().simple_name()),
        }
    }))
}

/// Visitor performing provider registration for each visited node.
///
/// Per node: run the context's `configure` against the binder, then the
/// optional after-register hook (e.g. auto-registering discovered
/// post-processors).
pub struct ConfigurationVisitor<'a> {
    registry: &'a BindingRegistry,
    after_register: Option<Box<dyn Fn(&dyn DependencyContext) -> Result<()> + 'a>>,
}

impl<'a> ConfigurationVisitor<'a> {
    /// Visitor registering into the given registry
    pub fn new(registry: &'a BindingRegistry) -> Self {
        Self {
            registry,
            after_register: None,
        }
    }

    /// Attach a hook invoked after each successful registration
    pub fn with_after_register(
        mut self,
        hook: impl Fn(&dyn DependencyContext) -> Result<()> + 'a,
    ) -> Self {
        self.after_register = Some(Box::new(hook));
        self
    }
}

impl GraphVisitor for ConfigurationVisitor<'_> {
    fn visit(&mut self, node: &GraphNode) -> Result<bool> {
        let context = node.context();
        context.configure(self.registry).map_err(|error| {
            Error::configuration(context.key(), error.to_string())
        })?;
        if let Some(hook) = &self.after_register {
            hook(context.as_ref())?;
        }
        Ok(true)
    }

    fn binding_lookup(&self) -> Option<&dyn BindingLookup> {
        Some(self.registry)
    }
}

/// Post-traversal validation comparing the node set against the visited
/// set and folding in dependency keys no node provides.
pub struct GraphValidator;

impl GraphValidator {
    /// Collect missing dependencies into a report.
    ///
    /// Missing dependencies are surfaced, never raised; some are
    /// legitimately optional or satisfied by another mechanism, so the
    /// caller owns the fatality decision.
    pub fn validate(graph: &DependencyGraph, visited: &HashSet<NodeId>) -> ValidationReport {
        let mut missing: Vec<String> = graph
            .unresolved_dependencies()
            .iter()
            .map(|(_, key)| key.to_string())
            .collect();
        for (id, node) in graph.nodes().iter().enumerate() {
            if !visited.contains(&id) {
                missing.push(node.key().to_string());
            }
        }
        missing.sort();
        missing.dedup();
        ValidationReport { missing }
    }
}
