//! # Dragnet
//!
//! A multi-pattern string matcher for Rust based on the Aho-Corasick automaton.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Single-pass scanning for any number of patterns
//! - Streaming match iterator with positions
//! - Unicode-aware, matches on characters
//! - Binary persistence for built automatons
//!
//! ## Example
//!
//! ```rust
//! use dragnet::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut trie = Trie::new();
//!     trie.add_string("he")?;
//!     trie.add_string("she")?;
//!     trie.add_string("his")?;
//!
//!     let automaton = trie.build();
//!     assert_eq!(automaton.search_all("she sells"), ["she", "he"]);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod search;
pub mod serialization;
pub mod storage;
pub mod trie;
pub mod util;

pub mod prelude {
    pub use crate::error::{DragnetError, Result};
    pub use crate::search::{Automaton, Match, Matches};
    pub use crate::trie::Trie;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
