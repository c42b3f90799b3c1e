//! Wire layout of a single node.

use std::io::{Read, Write};

use crate::error::{DragnetError, Result};
use crate::storage::{StructReader, StructWriter};
use crate::trie::{NodeId, TrieGraph};

/// Wire image of one child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRecord {
    /// Id of the child node.
    pub id: i32,
    /// Edge label.
    pub ch: char,
    /// Whether the child has edges of its own.
    pub has_children: bool,
}

impl ChildRecord {
    pub(crate) fn node_id(&self) -> NodeId {
        NodeId(self.id as u32)
    }
}

/// Wire image of one trie node.
///
/// Layout, integers little-endian: node id (i32), failure id (i32, -1 when
/// absent), child count (i32), then per child its id (i32), its character
/// as a Unicode scalar (u32) and a has-children flag (u8); then output
/// count (i32) and each output as a length-prefixed UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: i32,
    pub failure_id: i32,
    pub children: Vec<ChildRecord>,
    pub outputs: Vec<String>,
}

impl NodeRecord {
    /// Snapshot one node of `graph`.
    ///
    /// The child entries fix the edge order for this record, and the
    /// serializer streams the subtrees in the same order.
    pub(crate) fn from_node(graph: &TrieGraph, id: NodeId) -> NodeRecord {
        let node = &graph[id];
        let children = node
            .children()
            .map(|(c, child)| ChildRecord {
                id: child.value() as i32,
                ch: c,
                has_children: graph[child].has_children(),
            })
            .collect();

        NodeRecord {
            id: id.value() as i32,
            failure_id: node.failure().map_or(-1, |f| f.value() as i32),
            children,
            outputs: node.outputs().to_vec(),
        }
    }

    /// Write this record to `writer`.
    pub fn write<W: Write>(&self, writer: &mut StructWriter<W>) -> Result<()> {
        writer.write_i32(self.id)?;
        writer.write_i32(self.failure_id)?;

        writer.write_i32(self.children.len() as i32)?;
        for child in &self.children {
            writer.write_i32(child.id)?;
            writer.write_u32(child.ch as u32)?;
            writer.write_bool(child.has_children)?;
        }

        writer.write_i32(self.outputs.len() as i32)?;
        for output in &self.outputs {
            writer.write_string(output)?;
        }

        Ok(())
    }

    /// Read one record from `reader`, rejecting fields no writer produces.
    pub fn read<R: Read>(reader: &mut StructReader<R>) -> Result<NodeRecord> {
        let id = reader.read_i32()?;
        if id < 0 {
            return Err(DragnetError::serialization(format!(
                "Invalid node id {} at position {}",
                id,
                reader.position()
            )));
        }

        let failure_id = reader.read_i32()?;
        if failure_id < -1 {
            return Err(DragnetError::serialization(format!(
                "Invalid failure id {} at position {}",
                failure_id,
                reader.position()
            )));
        }

        let child_count = reader.read_i32()?;
        if child_count < 0 {
            return Err(DragnetError::serialization(format!(
                "Invalid child count {} at position {}",
                child_count,
                reader.position()
            )));
        }

        // Counts come from the stream, so capacity is grown per element
        // instead of reserved up front.
        let mut children = Vec::new();
        for _ in 0..child_count {
            let child_id = reader.read_i32()?;
            if child_id < 0 {
                return Err(DragnetError::serialization(format!(
                    "Invalid child id {} at position {}",
                    child_id,
                    reader.position()
                )));
            }

            let scalar = reader.read_u32()?;
            let ch = char::from_u32(scalar).ok_or_else(|| {
                DragnetError::serialization(format!(
                    "Invalid character scalar {:#x} at position {}",
                    scalar,
                    reader.position()
                ))
            })?;

            let has_children = reader.read_bool()?;

            children.push(ChildRecord {
                id: child_id,
                ch,
                has_children,
            });
        }

        let output_count = reader.read_i32()?;
        if output_count < 0 {
            return Err(DragnetError::serialization(format!(
                "Invalid output count {} at position {}",
                output_count,
                reader.position()
            )));
        }

        let mut outputs = Vec::new();
        for _ in 0..output_count {
            let output = reader.read_string()?;
            if output.is_empty() {
                return Err(DragnetError::serialization(format!(
                    "Empty output string at position {}",
                    reader.position()
                )));
            }
            outputs.push(output);
        }

        Ok(NodeRecord {
            id,
            failure_id,
            children,
            outputs,
        })
    }
}
