//! Token normalization.
//!
//! Turns raw seeds and suggestions into lowercase alphanumeric words:
//! compound tokens are split on non-word runs, the pieces are kept next to
//! the joined original, and anything too short to be useful is dropped.
//! `normalize` is a fixed point: normalizing its output changes nothing.

use crate::wordset::{char_len, WordSet};

/// Tokens shorter than this never survive normalization.
pub const MIN_TOKEN_LEN: usize = 3;

/// Normalize a word set.
pub fn normalize(words: &WordSet) -> WordSet {
    let mut normalized = WordSet::with_capacity(words.len());

    for word in words {
        let lower = word.to_lowercase();

        let pieces = std::iter::once(lower.as_str()).chain(split_subwords(&lower));
        for piece in pieces {
            let cleaned = strip_non_word(piece);
            if char_len(&cleaned) >= MIN_TOKEN_LEN {
                normalized.insert(cleaned);
            }
        }
    }

    normalized
}

/// Split a token on runs of non-alphanumeric characters.
pub fn split_subwords(word: &str) -> impl Iterator<Item = &str> {
    word.split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
}

/// Remove every non-alphanumeric character.
pub fn strip_non_word(word: &str) -> String {
    word.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Keep only words whose length lies in `[min, max]`.
pub fn retain_lengths(mut words: WordSet, min: usize, max: usize) -> WordSet {
    words.retain(|w| (min..=max).contains(&char_len(w)));
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(words: &[&str]) -> WordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_compound_tokens_are_split_and_joined() {
        let out = normalize(&set(&["Harry Potter", "hogwarts-castle"]));
        assert_eq!(
            out,
            set(&["harrypotter", "harry", "potter", "hogwartscastle", "hogwarts", "castle"])
        );
    }

    #[test]
    fn test_short_pieces_are_dropped() {
        let out = normalize(&set(&["go-to", "ab", "x.y.z"]));
        // Only the joined forms are long enough to survive.
        assert_eq!(out, set(&["goto", "xyz"]));
    }

    #[test]
    fn test_punctuation_and_underscores_are_stripped() {
        let out = normalize(&set(&["'quidditch'.", "snake_case"]));
        assert_eq!(out, set(&["quidditch", "snakecase", "snake", "case"]));
    }

    #[test]
    fn test_digits_are_kept() {
        let out = normalize(&set(&["route66"]));
        assert_eq!(out, set(&["route66"]));
    }

    #[test]
    fn test_retain_lengths() {
        let out = retain_lengths(set(&["abc", "abcdef", "abcdefghij"]), 4, 8);
        assert_eq!(out, set(&["abcdef"]));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(words in prop::collection::vec("[a-zA-Z0-9 _.'-]{0,16}", 0..8)) {
            let input: WordSet = words.into_iter().collect();
            let once = normalize(&input);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalized_words_are_clean(words in prop::collection::vec("[a-zA-Z0-9 _.'-]{0,16}", 0..8)) {
            let input: WordSet = words.into_iter().collect();
            for word in normalize(&input) {
                prop_assert!(char_len(&word) >= MIN_TOKEN_LEN);
                prop_assert!(word.chars().all(|c| c.is_alphanumeric()));
                prop_assert_eq!(word.to_lowercase(), word.clone());
            }
        }
    }
}
