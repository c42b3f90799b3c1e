//! Error types for the Dragnet library.
//!
//! This module provides error handling for all Dragnet operations. All errors
//! are represented by the [`DragnetError`] enum, which provides detailed
//! information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use dragnet::error::{DragnetError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     // Return an error
//!     Err(DragnetError::pattern("Pattern must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Dragnet operations.
///
/// This enum represents all possible errors that can occur in the Dragnet
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum DragnetError {
    /// I/O errors (file operations, stream reads/writes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization errors (malformed or truncated node graph streams)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Pattern-related errors (invalid patterns passed to the builder)
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Invalid state errors (structurally unusable automaton graphs)
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for operations that may fail with DragnetError.
pub type Result<T> = std::result::Result<T, DragnetError>;

impl DragnetError {
    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        DragnetError::Serialization(msg.into())
    }

    /// Create a new pattern error.
    pub fn pattern<S: Into<String>>(msg: S) -> Self {
        DragnetError::Pattern(msg.into())
    }

    /// Create a new invalid state error.
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        DragnetError::InvalidState(msg.into())
    }
}
