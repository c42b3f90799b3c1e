//! Streaming node graph serialization.

use std::io::{Read, Write};

use ahash::AHashMap;

use crate::error::{DragnetError, Result};
use crate::serialization::record::NodeRecord;
use crate::storage::{StructReader, StructWriter};
use crate::trie::{NodeId, TrieGraph};

/// Writer and reader for node graph streams.
///
/// A graph is streamed as a flat record sequence in depth-first pre-order,
/// root first. Tree edges always point forward in the stream, but failure
/// links can point anywhere, so a record may name a failure id whose record
/// has not arrived yet. The reader parks such references and resolves them
/// once the last record is in; a stream that leaves any reference dangling
/// is rejected as a whole.
///
/// One context serves one stream. `read_graph` resets the bookkeeping, so
/// a context can be reused sequentially.
pub struct SerializationContext {
    cache: AHashMap<i32, NodeId>,
    pending_failures: Vec<(NodeId, i32)>,
}

impl Default for SerializationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SerializationContext {
    /// Create a fresh context.
    pub fn new() -> Self {
        SerializationContext {
            cache: AHashMap::new(),
            pending_failures: Vec::new(),
        }
    }

    /// Write `graph` to `writer` as a record stream.
    pub fn write_graph<W: Write>(
        &mut self,
        graph: &TrieGraph,
        writer: &mut StructWriter<W>,
    ) -> Result<()> {
        if graph.node_count() > i32::MAX as usize {
            return Err(DragnetError::serialization(format!(
                "Graph has {} nodes, more than stream ids can address",
                graph.node_count()
            )));
        }

        let mut stack = vec![graph.root()];
        while let Some(id) = stack.pop() {
            let record = NodeRecord::from_node(graph, id);
            record.write(writer)?;

            // Pushed in reverse so the record's first child entry is the
            // next subtree on the stream
            for child in record.children.iter().rev() {
                stack.push(child.node_id());
            }
        }

        Ok(())
    }

    /// Read a record stream into a fresh graph.
    ///
    /// Stream ids never become graph ids: every record lands in a newly
    /// allocated node and the stream ids live only in this context, so a
    /// loaded graph cannot collide with ids handed out elsewhere. Trailing
    /// bytes after the root's subtree are left unread.
    ///
    /// The returned graph is fully linked but not validated; wrap it with
    /// [`Automaton::from_graph`](crate::search::Automaton::from_graph) to
    /// check it is usable for scanning.
    pub fn read_graph<R: Read>(&mut self, reader: &mut StructReader<R>) -> Result<TrieGraph> {
        self.cache.clear();
        self.pending_failures.clear();

        let mut graph = TrieGraph::new();

        // Nodes whose records are still on the stream, next on top. The
        // expectation is the (id, has-children) pair the parent's child
        // entry announced.
        let mut stack: Vec<(NodeId, Option<(i32, bool)>)> = vec![(graph.root(), None)];

        while let Some((node_id, expectation)) = stack.pop() {
            let record = NodeRecord::read(reader)?;

            if let Some((expected_id, has_children)) = expectation {
                if record.id != expected_id {
                    return Err(DragnetError::serialization(format!(
                        "Node id mismatch at position {}: parent announced {}, record carries {}",
                        reader.position(),
                        expected_id,
                        record.id
                    )));
                }
                if has_children != !record.children.is_empty() {
                    return Err(DragnetError::serialization(format!(
                        "Has-children flag of node {} contradicts its record at position {}",
                        record.id,
                        reader.position()
                    )));
                }
            }

            if self.cache.insert(record.id, node_id).is_some() {
                return Err(DragnetError::serialization(format!(
                    "Duplicate node id {} at position {}",
                    record.id,
                    reader.position()
                )));
            }

            if record.failure_id != -1 {
                match self.cache.get(&record.failure_id) {
                    Some(&target) => graph.node_mut(node_id).failure = Some(target),
                    None => self.pending_failures.push((node_id, record.failure_id)),
                }
            }

            graph.node_mut(node_id).outputs = record.outputs;

            let mut children = Vec::with_capacity(record.children.len());
            for entry in &record.children {
                let child = graph.alloc();
                if graph
                    .node_mut(node_id)
                    .children
                    .insert(entry.ch, child)
                    .is_some()
                {
                    return Err(DragnetError::serialization(format!(
                        "Duplicate child character {:?} at position {}",
                        entry.ch,
                        reader.position()
                    )));
                }
                children.push((child, Some((entry.id, entry.has_children))));
            }
            for entry in children.into_iter().rev() {
                stack.push(entry);
            }
        }

        for &(node_id, failure_id) in &self.pending_failures {
            match self.cache.get(&failure_id) {
                Some(&target) => graph.node_mut(node_id).failure = Some(target),
                None => return Err(DragnetError::serialization("Failure node not found")),
            }
        }

        Ok(graph)
    }
}
