//! Binary persistence for automatons.
//!
//! The format is a flat sequence of node records in depth-first pre-order,
//! little-endian throughout, with varint length prefixes on strings. See
//! [`record::NodeRecord`] for the record layout and [`SerializationContext`]
//! for the stream protocol.

pub mod context;
pub mod record;

pub use context::*;
pub use record::*;
