//! Word sets and the shared accumulator written by concurrent tasks.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// A deduplicated, unordered collection of words.
pub type WordSet = HashSet<String>;

/// Length of a word in characters, the unit every size bound is expressed in.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Consume a set into a lexicographically sorted list.
pub fn sorted(words: WordSet) -> Vec<String> {
    let mut list: Vec<String> = words.into_iter().collect();
    list.sort_unstable();
    list
}

/// A `WordSet` shared between tasks behind a mutex.
///
/// Size checks and writes take the lock separately, so a caller that checks
/// the size and then writes can race with another writer. Callers treat the
/// word budget as a soft cap for that reason.
#[derive(Debug, Clone, Default)]
pub struct SharedWordSet {
    inner: Arc<Mutex<WordSet>>,
}

#[allow(clippy::len_without_is_empty)]
impl SharedWordSet {
    /// Create an empty shared set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing set.
    pub fn from_set(words: WordSet) -> Self {
        Self {
            inner: Arc::new(Mutex::new(words)),
        }
    }

    /// Current number of words.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Insert one word, returning whether it was new.
    pub fn insert(&self, word: impl Into<String>) -> bool {
        self.inner.lock().insert(word.into())
    }

    /// Union a batch of words into the set under a single lock.
    pub fn extend<I>(&self, words: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.inner.lock().extend(words);
    }

    /// Take the contents, leaving the set empty.
    pub fn take(&self) -> WordSet {
        std::mem::take(&mut *self.inner.lock())
    }
}
