//! Arena storage for trie nodes.

use std::ops::Index;

use crate::trie::node::{NodeId, TrieNode};

/// Arena-based node graph.
///
/// All nodes live in one contiguous `Vec` and refer to each other through
/// [`NodeId`] indices, so failure links can point anywhere in the graph
/// without reference cycles. The root always occupies slot 0. Ids are
/// allocation order, whether a node was created by pattern insertion or by
/// deserialization.
#[derive(Debug, Clone)]
pub struct TrieGraph {
    nodes: Vec<TrieNode>,
    root: NodeId,
}

impl TrieGraph {
    /// Create a graph containing only the root node.
    pub(crate) fn new() -> Self {
        TrieGraph {
            nodes: vec![TrieNode::default()],
            root: NodeId(0),
        }
    }

    /// Allocate a new empty node and return its id.
    pub(crate) fn alloc(&mut self) -> NodeId {
        let idx = self.nodes.len();
        self.nodes.push(TrieNode::default());
        NodeId(idx as u32)
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by id.
    ///
    /// Returns `None` if the id does not belong to this graph.
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id.get())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TrieNode {
        &mut self.nodes[id.get()]
    }

    /// Child of `id` along the edge labeled `c`, if present.
    pub fn child(&self, id: NodeId, c: char) -> Option<NodeId> {
        self[id].children.get(&c).copied()
    }

    /// Failure link of `id`. `None` for the root and for unlinked nodes.
    pub fn failure(&self, id: NodeId) -> Option<NodeId> {
        self[id].failure
    }

    /// Patterns reported at `id`.
    pub fn outputs(&self, id: NodeId) -> &[String] {
        &self[id].outputs
    }

    /// Iterate over all nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TrieNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx as u32), node))
    }
}

impl Index<NodeId> for TrieGraph {
    type Output = TrieNode;

    /// Ids must come from this graph; a foreign id is out of bounds.
    fn index(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.get()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_has_root_only() {
        let graph = TrieGraph::new();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.root().value(), 0);
        assert!(graph.node(graph.root()).is_some());
        assert!(!graph[graph.root()].has_children());
    }

    #[test]
    fn test_alloc_assigns_sequential_ids() {
        let mut graph = TrieGraph::new();
        let a = graph.alloc();
        let b = graph.alloc();

        assert_eq!(a.value(), 1);
        assert_eq!(b.value(), 2);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_edges_and_lookup() {
        let mut graph = TrieGraph::new();
        let root = graph.root();
        let child = graph.alloc();
        graph.node_mut(root).children.insert('a', child);

        assert_eq!(graph.child(root, 'a'), Some(child));
        assert_eq!(graph.child(root, 'b'), None);
        assert_eq!(graph.child(child, 'a'), None);
    }

    #[test]
    fn test_node_rejects_foreign_id() {
        let graph = TrieGraph::new();
        assert!(graph.node(NodeId(42)).is_none());
    }

    #[test]
    fn test_iter_visits_all_nodes() {
        let mut graph = TrieGraph::new();
        graph.alloc();
        graph.alloc();

        let ids: Vec<u32> = graph.iter().map(|(id, _)| id.value()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
