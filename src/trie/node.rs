//! Trie node representation.

use ahash::AHashMap;

/// Identifier of a node in a trie graph.
///
/// Ids are dense indices handed out by a single monotonic counter, so an id
/// uniquely names one node for the lifetime of its graph. The same value is
/// written as the node id in serialized streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Numeric value of this id.
    pub fn value(self) -> u32 {
        self.0
    }

    pub(crate) fn get(self) -> usize {
        self.0 as usize
    }
}

/// A single node of the keyword trie.
///
/// Holds the outgoing character edges, the failure link computed during the
/// build step, and the patterns reported when a scan reaches this node.
/// Output order is significant: the node's own terminal patterns come first,
/// followed by the patterns inherited through its failure link.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Outgoing edges keyed by character.
    pub(crate) children: AHashMap<char, NodeId>,
    /// Longest proper suffix node. `None` for the root.
    pub(crate) failure: Option<NodeId>,
    /// Patterns reported at this node.
    pub(crate) outputs: Vec<String>,
}

impl TrieNode {
    /// Does this node have any outgoing edges?
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Outgoing edges as (character, child id) pairs, in no particular order.
    pub fn children(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.children.iter().map(|(&c, &id)| (c, id))
    }

    /// The failure link of this node, if one has been computed.
    pub fn failure(&self) -> Option<NodeId> {
        self.failure
    }

    /// Patterns reported when a scan reaches this node.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}
