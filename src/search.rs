//! Word search over the tree.
//!
//! A search descends from the root, consuming as much of the query as it can,
//! and reports either an exact hit, the stored words sharing a prefix with
//! the query, or no relation at all.

use crate::diff::DiffResult;
use crate::node::{collect_words, Node};

/// The outcome of searching the set for a word.
///
/// All reported words are complete stored words, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSearchResult {
    /// No stored word shares even a leading character with the query.
    NoMatch { query: String },

    /// The query itself is stored. `longer_words` lists every stored word
    /// that starts with the query and is longer than it.
    ExactMatch {
        query: String,
        longer_words: Vec<String>,
    },

    /// The query is not stored, but stored words share a prefix with it.
    PartialMatch {
        query: String,
        possible_matches: Vec<String>,
    },
}

impl WordSearchResult {
    /// The original search string.
    pub fn query(&self) -> &str {
        match self {
            WordSearchResult::NoMatch { query }
            | WordSearchResult::ExactMatch { query, .. }
            | WordSearchResult::PartialMatch { query, .. } => query,
        }
    }

    /// Flattens the result into the complete stored words it names.
    ///
    /// `NoMatch` yields nothing; `ExactMatch` yields the query followed by
    /// its longer words; `PartialMatch` yields its possible matches.
    pub fn unpack(self) -> Vec<String> {
        match self {
            WordSearchResult::NoMatch { .. } => Vec::new(),
            WordSearchResult::ExactMatch {
                query,
                longer_words,
            } => {
                let mut words = Vec::with_capacity(1 + longer_words.len());
                words.push(query);
                words.extend(longer_words);
                words
            }
            WordSearchResult::PartialMatch {
                possible_matches, ..
            } => possible_matches,
        }
    }
}

/// Searches for `query` below `root`.
///
/// The caller guarantees `query` is non-empty and whitespace-free; the
/// public layer answers `NoMatch` for invalid input without descending.
pub(crate) fn search(root: &Node, query: &str) -> WordSearchResult {
    let mut node = root;
    let mut consumed = String::new();
    let mut remaining = query;

    loop {
        debug_assert!(!remaining.is_empty());

        match node.find_child(remaining) {
            None => {
                // No edge below this node shares a first character with what
                // is left of the query.
                if consumed.is_empty() {
                    return WordSearchResult::NoMatch {
                        query: query.to_string(),
                    };
                }
                let mut matches = Vec::new();
                if node.is_terminal() {
                    matches.push(consumed.clone());
                }
                collect_words(node, &consumed, &mut matches);
                return WordSearchResult::PartialMatch {
                    query: query.to_string(),
                    possible_matches: matches,
                };
            }
            Some((index, DiffResult::Identical)) => {
                // The rest of the query lines up exactly with one edge.
                let child = &node.children()[index];
                let word = format!("{}{}", consumed, child.label());
                let mut words = Vec::new();
                collect_words(child, &word, &mut words);

                return if child.is_terminal() {
                    WordSearchResult::ExactMatch {
                        query: query.to_string(),
                        longer_words: words,
                    }
                } else {
                    WordSearchResult::PartialMatch {
                        query: query.to_string(),
                        possible_matches: words,
                    }
                };
            }
            Some((index, diff @ DiffResult::Shared { .. })) => {
                let label_fully_matched = match &diff {
                    DiffResult::Shared { remainder, .. } => remainder.is_empty(),
                    _ => unreachable!(),
                };
                let child = &node.children()[index];

                if label_fully_matched {
                    // The edge is fully consumed and the query continues.
                    let rest = match diff.remove_shared_prefix(remaining) {
                        Some(rest) => rest,
                        None => unreachable!("a shared diff always prefixes the query"),
                    };
                    consumed.push_str(child.label());
                    remaining = rest;
                    node = child;
                    continue;
                }

                // The walk stopped partway through this edge, either because
                // the query ended inside it or diverged from it. Everything
                // stored at or below the edge shares the matched prefix.
                let word = format!("{}{}", consumed, child.label());
                let mut matches = Vec::new();
                if child.is_terminal() {
                    matches.push(word.clone());
                }
                collect_words(child, &word, &mut matches);
                return WordSearchResult::PartialMatch {
                    query: query.to_string(),
                    possible_matches: matches,
                };
            }
            Some((_, DiffResult::Different)) => {
                unreachable!("find_child never yields an unrelated child")
            }
        }
    }
}
