//! Utility modules for Dragnet.

pub mod varint;

// Re-export commonly used types
pub use varint::*;
