//! Binary stream layer for Dragnet.
//!
//! This module provides the structured reader and writer the node graph
//! serializer is built on. Raw streams come from the caller, so anything
//! that implements `std::io::Read` or `std::io::Write` works here: files,
//! in-memory buffers, or network sockets.

pub mod structured;

// Re-export commonly used types
pub use structured::*;
