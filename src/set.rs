//! The public set type.
//!
//! `RadixSet` wraps the node tree in a single mutex: every public operation,
//! including each iterator step, holds the lock for its full duration, so
//! mutations never interleave and readers never observe a half-updated tree.

use std::collections::HashSet;
use std::fmt;
use std::iter::FromIterator;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::iter::Iter;
use crate::node::{self, Node};
use crate::search::{self, WordSearchResult};

/// An opaque token that changes exactly once per successful structural
/// mutation. Iterators compare tokens to detect concurrent modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Version(u64);

impl Version {
    fn new() -> Self {
        Version(0)
    }

    fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// The guarded state: the node tree plus its word count and version token.
pub(crate) struct TreeState {
    pub(crate) root: Node,
    pub(crate) size: usize,
    pub(crate) version: Version,
}

/// A mutable, in-memory set of strings backed by a compressed radix tree.
///
/// Stored words are kept path-compressed: no chain of single-child nodes
/// survives an edit, and no two sibling edges share a leading character.
/// Words are enumerated in ascending lexicographic order.
///
/// Any string containing whitespace is invalid input, and the empty string
/// can never be stored; the affected operation reports `false` (or
/// `NoMatch`) instead of failing, so bulk operations degrade per element.
///
/// All methods take `&self` and serialize on an internal mutex, so a shared
/// `RadixSet` can be used from several threads at once.
///
/// # Examples
///
/// ```
/// use radix_set::RadixSet;
///
/// let set = RadixSet::new();
/// assert!(set.add("apple"));
/// assert!(set.add("apply"));
/// assert!(!set.add("apple"));
///
/// assert!(set.contains("apple"));
/// assert_eq!(set.len(), 2);
///
/// let words: Vec<String> = set.iter().collect();
/// assert_eq!(words, vec!["apple", "apply"]);
/// ```
pub struct RadixSet {
    inner: Mutex<TreeState>,
}

impl RadixSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        RadixSet {
            inner: Mutex::new(TreeState {
                root: Node::new_root(),
                size: 0,
                version: Version::new(),
            }),
        }
    }

    // A poisoned lock can only mean a panic out of an invariant violation,
    // which already aborted the operation that corrupted nothing observable;
    // recover the state rather than propagating poison.
    pub(crate) fn lock(&self) -> MutexGuard<'_, TreeState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds `word` to the set. Returns `true` if the set did not already
    /// contain it. Invalid input (empty or containing whitespace) returns
    /// `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_set::RadixSet;
    ///
    /// let set = RadixSet::new();
    /// assert!(set.add("hello"));
    /// assert!(!set.add("hello"));
    /// assert!(!set.add("not valid"));
    /// ```
    pub fn add(&self, word: &str) -> bool {
        if !is_valid_word(word) {
            return false;
        }

        let mut state = self.lock();
        let added = node::add(&mut state.root, word);
        if added {
            state.size += 1;
            state.version.bump();
        }
        added
    }

    /// Removes `word` from the set. Returns `true` if it was present.
    pub fn remove(&self, word: &str) -> bool {
        if !is_valid_word(word) {
            return false;
        }

        let mut state = self.lock();
        let removed = node::remove(&mut state.root, word);
        if removed {
            state.size -= 1;
            state.version.bump();
            node::cleanup(&mut state.root);
        }
        removed
    }

    /// Returns `true` if the set contains `word`.
    pub fn contains(&self, word: &str) -> bool {
        if !is_valid_word(word) {
            return false;
        }
        let state = self.lock();
        node::contains(&state.root, word)
    }

    /// Returns the number of words stored in the set.
    pub fn len(&self) -> usize {
        self.lock().size
    }

    /// Returns `true` if the set contains no words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every word from the set.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.root = Node::new_root();
        state.size = 0;
        state.version.bump();
    }

    /// Adds every word in `words`, returning `true` only if every single
    /// addition succeeded. Never short-circuits, so one invalid element
    /// does not prevent the rest from being added.
    pub fn add_all<I>(&self, words: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        words
            .into_iter()
            .fold(true, |all, word| self.add(word.as_ref()) && all)
    }

    /// Removes every word in `words`, returning `true` only if every single
    /// removal succeeded. Never short-circuits.
    pub fn remove_all<I>(&self, words: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        words
            .into_iter()
            .fold(true, |all, word| self.remove(word.as_ref()) && all)
    }

    /// Removes every stored word *not* contained in `words`, returning
    /// `true` only if every removal succeeded.
    pub fn retain_all<I>(&self, words: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let keep: HashSet<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_string())
            .collect();

        self.words()
            .into_iter()
            .filter(|word| !keep.contains(word))
            .fold(true, |all, word| self.remove(&word) && all)
    }

    /// Returns `true` if the set contains every word in `words`.
    pub fn contains_all<I>(&self, words: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        words.into_iter().all(|word| self.contains(word.as_ref()))
    }

    /// Returns an ordered snapshot of every stored word.
    pub fn words(&self) -> Vec<String> {
        let state = self.lock();
        let mut out = Vec::with_capacity(state.size);
        node::collect_words(&state.root, "", &mut out);
        out
    }

    /// Searches the set for `query`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_set::{RadixSet, WordSearchResult};
    ///
    /// let set = RadixSet::new();
    /// set.add_all(&["apple", "application", "apply"]);
    ///
    /// match set.search("appl") {
    ///     WordSearchResult::PartialMatch { possible_matches, .. } => {
    ///         assert_eq!(possible_matches, vec!["apple", "application", "apply"]);
    ///     }
    ///     other => panic!("unexpected result: {:?}", other),
    /// }
    /// ```
    pub fn search(&self, query: &str) -> WordSearchResult {
        if !is_valid_word(query) {
            return WordSearchResult::NoMatch {
                query: query.to_string(),
            };
        }
        let state = self.lock();
        search::search(&state.root, query)
    }

    /// Returns an ordered iterator over the stored words.
    ///
    /// The iterator tolerates mutation of the set while it is live,
    /// including removals performed through [`Iter::remove_current`]; see
    /// [`Iter`] for the resynchronization policy.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && !word.chars().any(char::is_whitespace)
}

impl Default for RadixSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RadixSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.words()).finish()
    }
}

impl PartialEq for RadixSet {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.words() == other.words()
    }
}

impl Eq for RadixSet {}

impl<S: AsRef<str>> FromIterator<S> for RadixSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let set = RadixSet::new();
        set.add_all(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for RadixSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a> IntoIterator for &'a RadixSet {
    type Item = String;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
