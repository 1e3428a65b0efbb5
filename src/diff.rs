//! String prefix comparison.
//!
//! This module classifies the relationship between two strings: identical,
//! sharing a common leading prefix, or entirely unrelated. Every navigation
//! decision in the tree is driven by this classification.

/// The relationship between two strings, as determined by [`diff_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DiffResult {
    /// The strings share no leading characters.
    Different,

    /// The strings share a leading prefix but are not equal.
    ///
    /// `remainder` is the suffix of the *first* argument to [`diff_with`]
    /// after `shared_prefix`.
    Shared {
        shared_prefix: String,
        remainder: String,
    },

    /// The strings are equal.
    Identical,
}

impl DiffResult {
    /// Strips this result's shared prefix from `s`, if `s` starts with it.
    ///
    /// Returns `None` for non-`Shared` results or when `s` does not start
    /// with the shared prefix; callers treat that as a programmer error.
    pub(crate) fn remove_shared_prefix<'a>(&self, s: &'a str) -> Option<&'a str> {
        match self {
            DiffResult::Shared { shared_prefix, .. } => s.strip_prefix(shared_prefix.as_str()),
            _ => None,
        }
    }
}

/// Compares `a` against `b`, classifying how much of a leading prefix they share.
pub(crate) fn diff_with(a: &str, b: &str) -> DiffResult {
    let mut shared_len = 0;

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        shared_len += ca.len_utf8();
    }

    if shared_len == 0 {
        DiffResult::Different
    } else if shared_len == a.len() && shared_len == b.len() {
        DiffResult::Identical
    } else {
        DiffResult::Shared {
            shared_prefix: a[..shared_len].to_string(),
            remainder: a[shared_len..].to_string(),
        }
    }
}
