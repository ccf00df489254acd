//! Tolerant extraction of words from free-form model output.
//!
//! Models answer with numbered lists, bullet lists, comma-separated runs or a
//! mix of all three. Each line loses its list numbering and is split on
//! punctuation that cannot occur inside a word (`,` `;` `:` `/` brackets and
//! the like); every item then loses bullets, quotes and trailing periods.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Leading list decoration: numbering ("1.", "2)", "10 -"), bullets and
/// stray punctuation.
static LIST_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[\s\d\-*•+#.):\]"'`]*"#).expect("static regex is valid"));

/// Punctuation separating items within a line.
static ITEM_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;:()/|\[\]{}!?]+").expect("static regex is valid"));

/// Split free text into distinct lowercase words, in order of appearance.
pub fn words_from_text(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for line in text.lines() {
        let line = LIST_PREFIX.replace(line, "");
        for item in ITEM_SEPARATOR.split(&line) {
            if let Some(word) = clean_item(item) {
                if seen.insert(word.clone()) {
                    words.push(word);
                }
            }
        }
    }

    words
}

/// Strip decoration from one list item; `None` unless a letter remains.
fn clean_item(item: &str) -> Option<String> {
    let stripped = LIST_PREFIX.replace(item, "");
    let word = stripped
        .trim()
        .trim_end_matches(['.', '!', '"', '\'', '`'])
        .trim()
        .to_lowercase();

    if word.chars().any(|c| c.is_alphabetic()) {
        Some(word)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_numbered_list() {
        let text = "1. Wand\n2. Broomstick\n3) Quidditch\n10 - Hogwarts.";
        assert_eq!(words_from_text(text), vec!["wand", "broomstick", "quidditch", "hogwarts"]);
    }

    #[test]
    fn test_bullets_and_quotes() {
        let text = "- \"Gryffindor\"\n* Slytherin\n• 'Ravenclaw'\n";
        assert_eq!(words_from_text(text), vec!["gryffindor", "slytherin", "ravenclaw"]);
    }

    #[test]
    fn test_comma_separated() {
        let text = "Here you go: Snitch, Bludger, Quaffle.";
        assert_eq!(words_from_text(text), vec!["here you go", "snitch", "bludger", "quaffle"]);
    }

    #[test]
    fn test_brackets_and_slashes_separate_items() {
        let text = "1) Wand (magic stick)\n2) Owl/Raven\n3) Potion [brew]";
        assert_eq!(
            words_from_text(text),
            vec!["wand", "magic stick", "owl", "raven", "potion", "brew"]
        );
    }

    #[test]
    fn test_numbers_alone_are_not_words() {
        assert_eq!(words_from_text("Top 3: (1) Basilisk"), vec!["top 3", "basilisk"]);
    }

    #[test]
    fn test_multiword_items_are_kept_whole() {
        // Subword splitting happens later, during normalization.
        assert_eq!(words_from_text("1. Dark Arts"), vec!["dark arts"]);
    }

    #[test]
    fn test_empty_and_noise() {
        assert!(words_from_text("").is_empty());
        assert!(words_from_text("\n\n1.\n- \n...").is_empty());
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(words_from_text("Owl\nowl\nOWL."), vec!["owl"]);
    }

    proptest! {
        #[test]
        fn prop_output_is_clean(text in "[a-zA-Z0-9 .,;:\\-*\n]{0,80}") {
            for word in words_from_text(&text) {
                prop_assert_eq!(word.to_lowercase(), word.clone());
                prop_assert_eq!(word.trim(), word.as_str());
                prop_assert!(word.chars().any(|c| c.is_alphabetic()));
            }
        }
    }
}
