//! Automaton construction and the search entry points.

pub mod matches;

pub use self::matches::{Match, Matches};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::ops::Range;
use std::path::Path;

use crate::error::{DragnetError, Result};
use crate::serialization::SerializationContext;
use crate::storage::{StructReader, StructWriter};
use crate::trie::TrieGraph;

/// An immutable multi-pattern matcher.
///
/// Produced by [`Trie::build`](crate::trie::Trie::build), by loading a
/// serialized graph, or by [`Automaton::from_graph`]. Every search method
/// borrows the automaton immutably and keeps its scan state in the returned
/// iterator, so one instance can serve any number of concurrent searches.
///
/// # Examples
///
/// ```
/// use dragnet::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.add_string("her").unwrap();
/// trie.add_string("he").unwrap();
/// trie.add_string("his").unwrap();
/// let automaton = trie.build();
///
/// assert_eq!(automaton.search_all("my his he is good"), ["his", "he"]);
/// ```
#[derive(Debug, Clone)]
pub struct Automaton {
    graph: TrieGraph,
}

impl Automaton {
    /// Wrap a graph that the build step just linked. No validation.
    pub(crate) fn from_built(graph: TrieGraph) -> Self {
        Automaton { graph }
    }

    /// Wrap an existing node graph, validating its structure first.
    ///
    /// A usable graph has a failure link on every node except the root,
    /// none on the root itself, every link and edge pointing at a node of
    /// the graph, and failure chains that lead back to the root. Anything
    /// else is rejected, since a scan over such a graph could dereference
    /// nothing or never terminate.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error describing the first violation
    /// found.
    pub fn from_graph(graph: TrieGraph) -> Result<Self> {
        validate_graph(&graph)?;
        Ok(Automaton { graph })
    }

    /// The underlying node graph.
    pub fn graph(&self) -> &TrieGraph {
        &self.graph
    }

    /// Decompose into the underlying node graph.
    pub fn into_graph(self) -> TrieGraph {
        self.graph
    }

    /// Lazily iterate over the matches in `text`.
    pub fn matches<'a, 't>(&'a self, text: &'t str) -> Matches<'a, 't> {
        Matches::new(&self.graph, text)
    }

    /// First matching pattern, scanning no further than needed.
    pub fn search(&self, text: &str) -> Option<&str> {
        self.matches(text).next().map(|m| m.pattern)
    }

    /// All matching patterns in scan order.
    ///
    /// Overlapping matches are all reported, and a pattern added twice is
    /// reported twice.
    pub fn search_all(&self, text: &str) -> Vec<&str> {
        self.matches(text).map(|m| m.pattern).collect()
    }

    /// Reported character range of the first match.
    pub fn search_range(&self, text: &str) -> Option<Range<usize>> {
        self.matches(text).next().map(|m| m.range())
    }

    /// Reported character ranges of all matches in scan order.
    pub fn search_all_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.matches(text).map(|m| m.range()).collect()
    }

    /// Serialize the node graph to any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = StructWriter::new(writer);
        let mut context = SerializationContext::new();
        context.write_graph(&self.graph, &mut writer)?;
        writer.flush()
    }

    /// Deserialize an automaton from any reader.
    ///
    /// The graph is validated as in [`Automaton::from_graph`] before the
    /// automaton is returned, so a stream that decodes into an unusable
    /// graph is rejected as a whole.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut reader = StructReader::new(reader);
        let mut context = SerializationContext::new();
        let graph = context.read_graph(&mut reader)?;
        Automaton::from_graph(graph)
    }

    /// Save the node graph to a file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Load an automaton from a file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}

fn validate_graph(graph: &TrieGraph) -> Result<()> {
    let root = graph.root();

    for (id, node) in graph.iter() {
        for (c, child) in node.children() {
            if graph.node(child).is_none() {
                return Err(DragnetError::invalid_state(format!(
                    "Edge {:?} of node {} points outside the graph",
                    c,
                    id.value()
                )));
            }
        }

        match (id == root, node.failure()) {
            (true, Some(_)) => {
                return Err(DragnetError::invalid_state(
                    "Root node must not have a failure link",
                ));
            }
            (false, None) => {
                return Err(DragnetError::invalid_state(format!(
                    "Node {} has no failure link",
                    id.value()
                )));
            }
            (false, Some(f)) if graph.node(f).is_none() => {
                return Err(DragnetError::invalid_state(format!(
                    "Failure link of node {} points outside the graph",
                    id.value()
                )));
            }
            _ => {}
        }
    }

    // Every failure chain must reach the root, or a scan could loop forever.
    // 0 = unvisited, 1 = on the chain being walked, 2 = known to reach root.
    let mut state = vec![0u8; graph.node_count()];
    state[root.get()] = 2;

    for (id, _) in graph.iter() {
        if state[id.get()] != 0 {
            continue;
        }

        let mut chain = Vec::new();
        let mut cur = id;
        loop {
            match state[cur.get()] {
                1 => {
                    return Err(DragnetError::invalid_state(format!(
                        "Failure links form a cycle through node {}",
                        cur.value()
                    )));
                }
                2 => break,
                _ => {}
            }

            state[cur.get()] = 1;
            chain.push(cur);

            // Only the root lacks a link, and the root never enters the chain
            match graph.failure(cur) {
                Some(next) => cur = next,
                None => break,
            }
        }

        for n in chain {
            state[n.get()] = 2;
        }
    }

    Ok(())
}
