//! Internal node model and mutation engine.
//!
//! The tree is a compressed radix trie: every edge carries a string label, and
//! two invariants hold between operations:
//!
//! 1. Sibling labels never share a first character and are kept in strict
//!    ascending order, so at most one child can match any query and children
//!    can be located by binary search.
//! 2. No non-root node is simultaneously non-terminal and single-childed;
//!    [`cleanup`] collapses such chains after every removal.
//!
//! `add` preserves the invariants by splitting an edge when an insert diverges
//! partway through its label; `remove` preserves them by dropping empty leaves
//! and absorbing redundant single-child chains on the way back up.

use std::cmp::Ordering;
use std::mem;

use crate::diff::{diff_with, DiffResult};

/// A node of the tree.
///
/// The tree owns exactly one `Root`; all other nodes are `Child` variants
/// owned transitively through their parent's children vector. There are no
/// parent pointers; traversals that need ancestry carry an explicit stack.
#[derive(Debug)]
pub(crate) enum Node {
    Root {
        children: Vec<Node>,
    },
    Child {
        label: String,
        terminal: bool,
        children: Vec<Node>,
    },
}

impl Node {
    pub(crate) fn new_root() -> Self {
        Node::Root {
            children: Vec::new(),
        }
    }

    fn new_leaf(label: &str) -> Self {
        Node::Child {
            label: label.to_string(),
            terminal: true,
            children: Vec::new(),
        }
    }

    /// The edge label of this node. Asking the root for a label is a
    /// programmer error and aborts.
    pub(crate) fn label(&self) -> &str {
        match self {
            Node::Child { label, .. } => label,
            Node::Root { .. } => panic!("the root node has no label"),
        }
    }

    /// Whether this node ends a stored word. The root never does.
    pub(crate) fn is_terminal(&self) -> bool {
        match self {
            Node::Child { terminal, .. } => *terminal,
            Node::Root { .. } => false,
        }
    }

    pub(crate) fn children(&self) -> &[Node] {
        match self {
            Node::Root { children } | Node::Child { children, .. } => children,
        }
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self {
            Node::Root { children } | Node::Child { children, .. } => children,
        }
    }

    /// Locates the single child that can match `query`, if any.
    ///
    /// The binary search comparator treats `Identical` and `Shared` as an
    /// equal key and falls back to plain lexicographic order for `Different`,
    /// which is sound because sibling labels never share a first character.
    pub(crate) fn find_child(&self, query: &str) -> Option<(usize, DiffResult)> {
        let children = self.children();
        let index = children
            .binary_search_by(|child| match diff_with(child.label(), query) {
                DiffResult::Identical | DiffResult::Shared { .. } => Ordering::Equal,
                DiffResult::Different => child.label().cmp(query),
            })
            .ok()?;

        Some((index, diff_with(children[index].label(), query)))
    }

    /// Inserts `child` among this node's children, preserving sort order.
    fn add_child(&mut self, child: Node) {
        let children = self.children_mut();
        let index = match children.binary_search_by(|c| c.label().cmp(child.label())) {
            Ok(_) => panic!("duplicate sibling label: {:?}", child.label()),
            Err(index) => index,
        };
        children.insert(index, child);
    }
}

/// Adds `word` below `node`, returning `true` if a new word was stored.
///
/// Callers reach this only through the tree's public API starting at the
/// root; the recursion consumes one matched edge per step.
pub(crate) fn add(node: &mut Node, word: &str) -> bool {
    if word.is_empty() {
        // The empty word is forbidden; the root can never become terminal.
        return match node {
            Node::Root { .. } => false,
            Node::Child { terminal, .. } => !mem::replace(terminal, true),
        };
    }

    match node.find_child(word) {
        None => {
            node.add_child(Node::new_leaf(word));
            true
        }
        Some((index, DiffResult::Identical)) => match &mut node.children_mut()[index] {
            Node::Child { terminal, .. } => !mem::replace(terminal, true),
            Node::Root { .. } => unreachable!("the root cannot be a child"),
        },
        Some((index, diff @ DiffResult::Shared { .. })) => {
            let rest = match diff.remove_shared_prefix(word) {
                Some(rest) => rest,
                None => unreachable!("a shared diff always prefixes the query"),
            };
            let label_fully_matched = match &diff {
                DiffResult::Shared { remainder, .. } => remainder.is_empty(),
                _ => unreachable!(),
            };

            let child = &mut node.children_mut()[index];
            if label_fully_matched {
                // The match consumed the whole edge; keep descending.
                add(child, rest)
            } else {
                split(child, &diff, rest);
                true
            }
        }
        Some((_, DiffResult::Different)) => {
            unreachable!("find_child never yields an unrelated child")
        }
    }
}

/// Splits `child`'s edge at the point where an insert diverged from its label.
///
/// The child becomes an intermediate labeled with the shared prefix. Its old
/// label suffix, terminal flag and children move into one new grandchild; the
/// inserted word's own suffix, if any, becomes a second grandchild, otherwise
/// the intermediate itself is marked terminal.
fn split(child: &mut Node, diff: &DiffResult, word_rest: &str) {
    let (shared_prefix, label_rest) = match diff {
        DiffResult::Shared {
            shared_prefix,
            remainder,
        } => (shared_prefix, remainder),
        _ => unreachable!("split only applies to a shared-prefix match"),
    };
    debug_assert!(!label_rest.is_empty());

    let (label, terminal, children) = match child {
        Node::Child {
            label,
            terminal,
            children,
        } => (label, terminal, children),
        Node::Root { .. } => unreachable!("split only applies to child nodes"),
    };

    let branch = Node::Child {
        label: label_rest.clone(),
        terminal: *terminal,
        children: mem::take(children),
    };
    label.truncate(shared_prefix.len());
    *terminal = word_rest.is_empty();

    child.add_child(branch);
    if !word_rest.is_empty() {
        child.add_child(Node::new_leaf(word_rest));
    }
}

/// Removes `word` below `node`, returning `true` if a stored word was cleared.
///
/// Mirrors [`add`]: an exact match clears the terminal flag, a full-label
/// shared match recurses. Every level runs [`cleanup`] on the child it
/// descended into so transient single-child chains never outlive the call.
pub(crate) fn remove(node: &mut Node, word: &str) -> bool {
    let (index, diff) = match node.find_child(word) {
        Some(found) => found,
        None => return false,
    };

    let removed = match diff {
        DiffResult::Identical => match &mut node.children_mut()[index] {
            Node::Child { terminal, .. } => mem::replace(terminal, false),
            Node::Root { .. } => unreachable!("the root cannot be a child"),
        },
        ref diff @ DiffResult::Shared { .. } => {
            let label_fully_matched = match diff {
                DiffResult::Shared { remainder, .. } => remainder.is_empty(),
                _ => unreachable!(),
            };
            if !label_fully_matched {
                // The word diverges inside this edge, so it is not stored.
                return false;
            }
            let rest = match diff.remove_shared_prefix(word) {
                Some(rest) => rest,
                None => unreachable!("a shared diff always prefixes the query"),
            };
            remove(&mut node.children_mut()[index], rest)
        }
        DiffResult::Different => unreachable!("find_child never yields an unrelated child"),
    };

    cleanup(&mut node.children_mut()[index]);
    removed
}

/// Restores the compaction invariant at `node` after a removal below it.
///
/// Drops children that are non-terminal and childless, then, for a
/// non-terminal child node left with exactly one child, absorbs that lone
/// child into `node`'s own edge.
pub(crate) fn cleanup(node: &mut Node) {
    node.children_mut()
        .retain(|child| child.is_terminal() || !child.children().is_empty());

    let (label, terminal, children) = match node {
        Node::Child {
            label,
            terminal,
            children,
        } => (label, terminal, children),
        Node::Root { .. } => return,
    };

    if *terminal || children.len() != 1 {
        return;
    }

    match children.pop() {
        Some(Node::Child {
            label: child_label,
            terminal: child_terminal,
            children: grandchildren,
        }) => {
            label.push_str(&child_label);
            *terminal = child_terminal;
            *children = grandchildren;
        }
        _ => unreachable!("children hold child nodes only"),
    }
}

/// Read-only mirror of [`add`]/[`remove`].
pub(crate) fn contains(node: &Node, word: &str) -> bool {
    if word.is_empty() {
        return node.is_terminal();
    }

    match node.find_child(word) {
        None => false,
        Some((index, DiffResult::Identical)) => node.children()[index].is_terminal(),
        Some((index, diff @ DiffResult::Shared { .. })) => {
            let label_fully_matched = match &diff {
                DiffResult::Shared { remainder, .. } => remainder.is_empty(),
                _ => unreachable!(),
            };
            if !label_fully_matched {
                return false;
            }
            let rest = match diff.remove_shared_prefix(word) {
                Some(rest) => rest,
                None => unreachable!("a shared diff always prefixes the query"),
            };
            contains(&node.children()[index], rest)
        }
        Some((_, DiffResult::Different)) => {
            unreachable!("find_child never yields an unrelated child")
        }
    }
}

/// Appends every terminal word below `node` to `out`, in ascending order.
///
/// `prefix` is the word accumulated from ancestor labels, including `node`'s
/// own label; `node`'s own word is *not* appended.
pub(crate) fn collect_words(node: &Node, prefix: &str, out: &mut Vec<String>) {
    for child in node.children() {
        let word = format!("{}{}", prefix, child.label());
        if child.is_terminal() {
            out.push(word.clone());
        }
        collect_words(child, &word, out);
    }
}
