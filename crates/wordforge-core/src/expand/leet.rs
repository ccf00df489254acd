//! Leet substitutions, pinned left to right under a per-word budget.

use wordforge_types::{Bound, LeetMapping};

/// Lazily enumerate the leet variants of `word`.
///
/// Scanning left to right, each character with a mapping branches into
/// `{original, substitute}` until `bound` substitutable positions have been
/// seen; every later position keeps its original character.
pub fn variants(word: &str, mapping: &LeetMapping, bound: Bound) -> LeetVariants {
    let chars: Vec<char> = word.chars().collect();
    let mut branches = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        if !bound.allows(branches.len() + 1) {
            break;
        }
        if let Some(sub) = mapping.get(c) {
            branches.push((i, sub));
        }
    }

    let toggled = vec![false; branches.len()];

    LeetVariants {
        chars,
        branches,
        toggled,
        done: false,
    }
}

/// Positions of `word` that [`variants`] is allowed to substitute.
pub fn substitutable_positions(word: &str, mapping: &LeetMapping, bound: Bound) -> Vec<usize> {
    variants(word, mapping, bound)
        .branches
        .into_iter()
        .map(|(i, _)| i)
        .collect()
}

/// Iterator returned by [`variants`].
///
/// Walks the Cartesian product of the branching positions as a binary
/// odometer, starting from the unmodified word.
#[derive(Debug, Clone)]
pub struct LeetVariants {
    chars: Vec<char>,
    branches: Vec<(usize, char)>,
    toggled: Vec<bool>,
    done: bool,
}

impl LeetVariants {
    fn render(&self) -> String {
        let mut chars = self.chars.clone();
        for (&(pos, sub), &on) in self.branches.iter().zip(&self.toggled) {
            if on {
                chars[pos] = sub;
            }
        }
        chars.into_iter().collect()
    }

    fn advance(&mut self) {
        for bit in self.toggled.iter_mut().rev() {
            if *bit {
                *bit = false;
            } else {
                *bit = true;
                return;
            }
        }
        // Wrapped around to all-false.
        self.done = true;
    }
}

impl Iterator for LeetVariants {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let variant = self.render();
        self.advance();
        Some(variant)
    }
}
