//! Keyword trie construction.
//!
//! [`Trie`] collects patterns into a prefix tree. Building it computes the
//! failure links that let a scan fall back to the longest matching suffix
//! instead of restarting, which is what makes single-pass multi-pattern
//! matching work.

pub mod graph;
pub mod node;

pub use self::graph::TrieGraph;
pub use self::node::{NodeId, TrieNode};

use std::collections::VecDeque;

use crate::error::{DragnetError, Result};
use crate::search::Automaton;

/// Builder that collects patterns for an automaton.
///
/// [`Trie::build`] consumes the builder and returns an immutable
/// [`Automaton`], so adding patterns to a built automaton or building the
/// same trie twice does not compile.
///
/// # Examples
///
/// ```
/// use dragnet::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.add_string("he").unwrap();
/// trie.add_string("she").unwrap();
/// let automaton = trie.build();
///
/// assert_eq!(automaton.search("she said"), Some("she"));
/// ```
#[derive(Debug, Clone)]
pub struct Trie {
    graph: TrieGraph,
    patterns: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Trie {
            graph: TrieGraph::new(),
            patterns: 0,
        }
    }

    /// Number of patterns added so far, counting repeats.
    pub fn len(&self) -> usize {
        self.patterns
    }

    /// Whether no pattern has been added yet.
    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    /// Add a pattern to the trie.
    ///
    /// Walks existing edges for the shared prefix and allocates nodes for
    /// the remainder, then records the pattern at its terminal node. Adding
    /// the same pattern twice records it twice, and a search will report it
    /// twice.
    ///
    /// # Errors
    ///
    /// Returns a `Pattern` error if `pattern` is empty.
    pub fn add_string(&mut self, pattern: &str) -> Result<()> {
        if pattern.is_empty() {
            return Err(DragnetError::pattern("Pattern must not be empty"));
        }

        let mut node = self.graph.root();
        for c in pattern.chars() {
            node = match self.graph.child(node, c) {
                Some(next) => next,
                None => {
                    let next = self.graph.alloc();
                    self.graph.node_mut(node).children.insert(c, next);
                    next
                }
            };
        }
        self.graph.node_mut(node).outputs.push(pattern.to_string());
        self.patterns += 1;

        Ok(())
    }

    /// Build the automaton, consuming the trie.
    pub fn build(self) -> Automaton {
        let mut graph = self.graph;
        build_failure_links(&mut graph);
        Automaton::from_built(graph)
    }
}

/// Breadth-first failure link computation.
///
/// Parents are finalized before their children, so each step only consults
/// links of strictly smaller depth. Depth-one nodes fall back to the root
/// directly; deeper nodes follow the parent's failure chain to the deepest
/// node with a matching edge. The failure target's output list is appended
/// after the node's own patterns, which keeps each list ordered from
/// longest suffix to shortest.
fn build_failure_links(graph: &mut TrieGraph) {
    let root = graph.root();

    let mut queue = VecDeque::new();
    let root_children: Vec<NodeId> = graph[root].children().map(|(_, id)| id).collect();
    for child in root_children {
        graph.node_mut(child).failure = Some(root);
        queue.push_back(child);
    }

    while let Some(node) = queue.pop_front() {
        let edges: Vec<(char, NodeId)> = graph[node].children().collect();
        for (c, child) in edges {
            queue.push_back(child);

            let mut fail = graph.failure(node);
            while let Some(f) = fail {
                if graph.child(f, c).is_some() {
                    break;
                }
                fail = graph.failure(f);
            }

            let target = fail.and_then(|f| graph.child(f, c)).unwrap_or(root);
            graph.node_mut(child).failure = Some(target);

            let inherited = graph[target].outputs.clone();
            graph.node_mut(child).outputs.extend(inherited);
        }
    }
}
