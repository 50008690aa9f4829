//! Dependency graph construction

use super::{DependencyGraph, GraphNode, NodeId};
use bindery_domain::dependency::DependencyContext;
use bindery_domain::key::ComponentKey;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builds a graph from resolved dependency contexts.
///
/// One node per context; an edge exists from every node owning a
/// dependency key to each node declaring that key. A dependency key no
/// node owns is recorded as unresolved, not raised: optional and
/// externally-satisfied dependencies are legal until validation says
/// otherwise.
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    /// Build the graph for one resolution pass
    pub fn build(contexts: Vec<Arc<dyn DependencyContext>>) -> DependencyGraph {
        let mut nodes: Vec<GraphNode> = Vec::with_capacity(contexts.len());
        let mut by_key: HashMap<ComponentKey, Vec<NodeId>> = HashMap::new();

        for context in contexts {
            let id = nodes.len();
            by_key.entry(context.key().clone()).or_default().push(id);
            nodes.push(GraphNode::new(context));
        }

        let mut unresolved: Vec<(NodeId, ComponentKey)> = Vec::new();
        for id in 0..nodes.len() {
            let dependency_keys: Vec<ComponentKey> = nodes[id]
                .context()
                .dependencies()
                .keys()
                .cloned()
                .collect();
            for key in dependency_keys {
                match by_key.get(&key) {
                    Some(owners) => {
                        for &owner in owners {
                            nodes[id].add_parent(owner);
                            nodes[owner].add_child(id);
                        }
                    }
                    None => unresolved.push((id, key)),
                }
            }
        }

        debug!(
            nodes = nodes.len(),
            unresolved = unresolved.len(),
            "dependency graph built"
        );
        DependencyGraph::new(nodes, by_key, unresolved)
    }
}
