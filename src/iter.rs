//! Ordered, mutation-tolerant iteration.
//!
//! The iterator walks the tree depth first, yielding stored words in
//! ascending lexicographic order. It snapshots nothing: every step locks the
//! set, so the walk always reads the live tree.
//!
//! Mutation tolerance works through the set's version token. The iterator
//! remembers the token it last observed; whenever a step sees a different
//! token, the walk restarts from the root and a set of already-yielded words
//! suppresses re-emission. Restarting (rather than resuming the old frame
//! stack in place) means a split or merge above the current position can
//! never cause a word to be skipped or produced twice.

use std::collections::HashSet;

use crate::node::{self, Node};
use crate::set::{RadixSet, TreeState, Version};

/// One level of the depth-first walk.
///
/// Frames identify nodes positionally (index within the parent's children)
/// rather than by reference, so no borrow of the tree outlives a single
/// locked step. Positions stay valid exactly as long as the version token
/// does, which is the only window in which they are used.
struct Frame {
    /// Index of this frame's node within its parent's children. Unused for
    /// the root frame.
    child_index: usize,

    /// The word accumulated from ancestor labels, including this node's own.
    word: String,

    /// Cursor over this node's not-yet-visited children.
    cursor: usize,
}

impl Frame {
    fn root() -> Self {
        Frame {
            child_index: 0,
            word: String::new(),
            cursor: 0,
        }
    }
}

/// An ordered iterator over a [`RadixSet`] that supports removing the most
/// recently yielded word.
///
/// Created by [`RadixSet::iter`]. Each call to [`next`](Iterator::next),
/// [`has_next`](Iter::has_next) or [`remove_current`](Iter::remove_current)
/// serializes on the set's mutex. Exhaustion is reported as `None`.
///
/// # Examples
///
/// ```
/// use radix_set::RadixSet;
///
/// let set = RadixSet::new();
/// set.add_all(&["banana", "apple", "cherry"]);
///
/// let mut iter = set.iter();
/// assert_eq!(iter.next().as_deref(), Some("apple"));
///
/// // Remove the word that was just yielded.
/// assert!(iter.remove_current());
/// assert_eq!(set.len(), 2);
///
/// let rest: Vec<String> = iter.collect();
/// assert_eq!(rest, vec!["banana", "cherry"]);
/// ```
pub struct Iter<'a> {
    set: &'a RadixSet,
    frames: Vec<Frame>,
    returned: HashSet<String>,
    /// One-ahead buffer filled by `has_next` and drained by `next`.
    pending: Option<String>,
    /// The most recently yielded word, consumed by `remove_current`.
    last: Option<String>,
    version: Version,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(set: &'a RadixSet) -> Self {
        let version = set.lock().version;
        Iter {
            set,
            frames: vec![Frame::root()],
            returned: HashSet::new(),
            pending: None,
            last: None,
            version,
        }
    }

    /// Returns `true` if another word remains, computing and buffering it.
    ///
    /// `next` drains the buffer, so `has_next` followed by `next` performs
    /// the search once.
    pub fn has_next(&mut self) -> bool {
        let set = self.set;
        let state = set.lock();
        self.resync(&state);

        if self.pending.is_some() {
            return true;
        }
        self.pending = self.find_next(&state);
        self.pending.is_some()
    }

    /// Removes the most recently yielded word from the set, through the
    /// set's own `remove`.
    ///
    /// Returns `false` without touching the set when nothing has been
    /// yielded yet or the current word was already removed.
    pub fn remove_current(&mut self) -> bool {
        let word = match self.last.take() {
            Some(word) => word,
            None => return false,
        };
        self.set.remove(&word)
    }

    /// Discards the walk state if the tree changed since the last step.
    fn resync(&mut self, state: &TreeState) {
        if state.version != self.version {
            self.frames.clear();
            self.frames.push(Frame::root());
            self.pending = None;
            self.version = state.version;
        }
    }

    /// Advances the depth-first walk to the next unreturned terminal word.
    fn find_next(&mut self, state: &TreeState) -> Option<String> {
        while !self.frames.is_empty() {
            let node = resolve(state, &self.frames);
            let top = match self.frames.last_mut() {
                Some(top) => top,
                None => unreachable!("the frame stack was just checked non-empty"),
            };

            if top.cursor >= node.children().len() {
                self.frames.pop();
                continue;
            }

            let child_index = top.cursor;
            top.cursor += 1;

            let child = &node.children()[child_index];
            let word = format!("{}{}", top.word, child.label());

            // Re-check presence against the live tree before yielding.
            let is_match = child.is_terminal()
                && !self.returned.contains(&word)
                && node::contains(&state.root, &word);

            self.frames.push(Frame {
                child_index,
                word: word.clone(),
                cursor: 0,
            });

            if is_match {
                return Some(word);
            }
        }

        None
    }
}

/// Walks the stored child indices down from the root to the top frame's node.
fn resolve<'t>(state: &'t TreeState, frames: &[Frame]) -> &'t Node {
    let mut node = &state.root;
    for frame in &frames[1..] {
        node = &node.children()[frame.child_index];
    }
    node
}

impl<'a> Iterator for Iter<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let set = self.set;
        let state = set.lock();
        self.resync(&state);

        let word = match self.pending.take() {
            Some(word) => word,
            None => self.find_next(&state)?,
        };

        self.returned.insert(word.clone());
        self.last = Some(word.clone());
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_sorted_and_complete() {
        let set = RadixSet::new();
        set.add_all(&["pear", "apple", "peach", "apricot", "plum"]);

        let words: Vec<String> = set.iter().collect();
        assert_eq!(words, vec!["apple", "apricot", "peach", "pear", "plum"]);
    }

    #[test]
    fn test_has_next_buffers_one_ahead() {
        let set = RadixSet::new();
        set.add("only");

        let mut iter = set.iter();
        assert!(iter.has_next());
        assert!(iter.has_next());
        assert_eq!(iter.next().as_deref(), Some("only"));
        assert!(!iter.has_next());
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_next_without_has_next() {
        let set = RadixSet::new();
        set.add_all(&["a", "b"]);

        let mut iter = set.iter();
        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(iter.next().as_deref(), Some("b"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_remove_current_before_first_element() {
        let set = RadixSet::new();
        set.add("word");

        let mut iter = set.iter();
        assert!(!iter.remove_current());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_current_is_single_shot() {
        let set = RadixSet::new();
        set.add_all(&["left", "right"]);

        let mut iter = set.iter();
        iter.next();
        assert!(iter.remove_current());
        assert!(!iter.remove_current());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_survives_additions_mid_iteration() {
        let set = RadixSet::new();
        set.add_all(&["b", "d"]);

        let mut iter = set.iter();
        assert_eq!(iter.next().as_deref(), Some("b"));

        // A structural change restarts the walk; "b" is suppressed as
        // already returned, and the new later word is picked up.
        set.add("c");
        assert_eq!(iter.next().as_deref(), Some("c"));
        assert_eq!(iter.next().as_deref(), Some("d"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_survives_splits_above_current_position() {
        let set = RadixSet::new();
        set.add_all(&["roman", "romulus"]);

        let mut iter = set.iter();
        assert_eq!(iter.next().as_deref(), Some("roman"));

        // Splits the "rom" edge above the iterator's current frame.
        set.add("rock");
        let rest: Vec<String> = iter.collect();
        assert_eq!(rest, vec!["rock", "romulus"]);
    }

    #[test]
    fn test_does_not_yield_words_removed_mid_iteration() {
        let set = RadixSet::new();
        set.add_all(&["ant", "bee", "cow"]);

        let mut iter = set.iter();
        assert_eq!(iter.next().as_deref(), Some("ant"));

        set.remove("bee");
        assert_eq!(iter.next().as_deref(), Some("cow"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_drain_via_remove_current() {
        let set = RadixSet::new();
        set.add_all(&["x", "y", "z"]);

        let mut iter = set.iter();
        while let Some(_) = iter.next() {
            assert!(iter.remove_current());
        }

        assert!(set.is_empty());
        assert!(set.words().is_empty());
    }
}
