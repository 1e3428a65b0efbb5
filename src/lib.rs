//! # Radix Set
//!
//! A mutable, in-memory set of strings backed by a compressed radix tree
//! (path-compressed trie).
//!
//! Every edit preserves the compaction invariant: no chain of single-child
//! nodes survives an edit and no two sibling edges share a leading
//! character. Inserts split edges where a new word diverges partway through
//! a label; removals merge redundant chains back into single edges.
//!
//! ## Features
//!
//! - **Set operations**: `add`, `remove`, `contains`, plus bulk variants
//!   that aggregate per-element success without short-circuiting
//! - **Word search**: exact and shared-prefix lookups via [`RadixSet::search`]
//! - **Ordered, mutation-tolerant iteration**: words come back in ascending
//!   lexicographic order, the set may be mutated while an iterator is live,
//!   and the iterator can remove the word it just yielded
//! - **Thread safety**: one mutex per set serializes every operation
//!
//! ## Example
//!
//! ```rust
//! use radix_set::RadixSet;
//!
//! let set = RadixSet::new();
//! set.add_all(&["apple", "application", "apply"]);
//!
//! assert!(set.contains("apply"));
//! assert_eq!(set.len(), 3);
//!
//! // Words sharing the prefix "appl":
//! let matches = set.search("appl").unpack();
//! assert_eq!(matches, vec!["apple", "application", "apply"]);
//! ```

mod diff;
mod iter;
mod node;
mod search;
mod set;

// Re-export public types
pub use crate::iter::Iter;
pub use crate::search::WordSearchResult;
pub use crate::set::RadixSet;
