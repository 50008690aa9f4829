//! Dependency graph
//!
//! Directed graph over discovered dependency contexts. Edges run from a
//! dependency to its dependents, so a node's *parents* are the nodes it
//! depends on and its ancestry is the transitive closure of its
//! dependencies. The graph is built once per resolution pass and never
//! mutated during traversal.

mod builder;
mod visitor;

pub use builder::DependencyGraphBuilder;
pub use visitor::{
    BindingLookup, ConfigurationVisitor, GraphValidator, GraphVisitor, traverse,
};

use bindery_domain::dependency::DependencyContext;
use bindery_domain::key::ComponentKey;
use bindery_domain::lifecycle::LifecycleType;
use std::collections::HashMap;
use std::sync::Arc;

/// Index of a node in the graph arena
pub type NodeId = usize;

/// One graph node wrapping exactly one dependency context.
pub struct GraphNode {
    context: Arc<dyn DependencyContext>,
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
}

impl GraphNode {
    pub(crate) fn new(context: Arc<dyn DependencyContext>) -> Self {
        Self {
            context,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The wrapped context
    pub fn context(&self) -> &Arc<dyn DependencyContext> {
        &self.context
    }

    /// Key of the wrapped context
    pub fn key(&self) -> &ComponentKey {
        self.context.key()
    }

    /// Nodes this node depends on (incoming dependency edges)
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Nodes depending on this node
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the wrapped context has singleton lifecycle
    pub fn is_singleton(&self) -> bool {
        self.context.lifecycle() == LifecycleType::Singleton
    }

    pub(crate) fn add_parent(&mut self, parent: NodeId) {
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
    }

    pub(crate) fn add_child(&mut self, child: NodeId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }
}

/// Directed dependency graph over an arena of nodes.
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    by_key: HashMap<ComponentKey, Vec<NodeId>>,
    unresolved: Vec<(NodeId, ComponentKey)>,
}

impl DependencyGraph {
    pub(crate) fn new(
        nodes: Vec<GraphNode>,
        by_key: HashMap<ComponentKey, Vec<NodeId>>,
        unresolved: Vec<(NodeId, ComponentKey)>,
    ) -> Self {
        Self {
            nodes,
            by_key,
            unresolved,
        }
    }

    /// Node by arena index
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id]
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Nodes providing the given key
    pub fn nodes_of(&self, key: &ComponentKey) -> &[NodeId] {
        self.by_key.get(key).map_or(&[], Vec::as_slice)
    }

    /// Dependency keys no node in the graph provides, with the node
    /// that requires them. A soft condition; the dependency may be
    /// satisfied externally.
    pub fn unresolved_dependencies(&self) -> &[(NodeId, ComponentKey)] {
        &self.unresolved
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
