//! Case permutations under an uppercase budget.

use wordforge_types::Bound;

/// Lowercase and uppercase forms of a character, when both are single
/// characters and differ.
fn case_pair(c: char) -> Option<(char, char)> {
    let mut lower = c.to_lowercase();
    let mut upper = c.to_uppercase();
    match (lower.next(), lower.next(), upper.next(), upper.next()) {
        (Some(l), None, Some(u), None) if l != u => Some((l, u)),
        _ => None,
    }
}

/// Number of characters in `word` whose case can be toggled.
pub fn toggleable(word: &str) -> usize {
    word.chars().filter(|c| case_pair(*c).is_some()).count()
}

/// Lazily enumerate the case variants of `word` with at most `bound`
/// uppercase characters.
///
/// Variants are produced in order of increasing uppercase count, each count
/// walking the k-combinations of toggleable positions. Nothing is materialized
/// up front, so callers can stop consuming at any point.
pub fn variants(word: &str, bound: Bound) -> CaseVariants {
    let mut base = Vec::new();
    let mut positions = Vec::new();
    let mut uppers = Vec::new();

    for (i, c) in word.chars().enumerate() {
        match case_pair(c) {
            Some((lower, upper)) => {
                base.push(lower);
                positions.push(i);
                uppers.push(upper);
            }
            None => base.push(c),
        }
    }

    let max_k = bound.min(positions.len());

    CaseVariants {
        base,
        positions,
        uppers,
        max_k,
        combo: Vec::new(),
        done: false,
    }
}

/// Iterator returned by [`variants`].
#[derive(Debug, Clone)]
pub struct CaseVariants {
    base: Vec<char>,
    positions: Vec<usize>,
    uppers: Vec<char>,
    max_k: usize,
    /// Indices into `positions` currently uppercased, strictly increasing.
    combo: Vec<usize>,
    done: bool,
}

impl CaseVariants {
    fn render(&self) -> String {
        let mut chars = self.base.clone();
        for &idx in &self.combo {
            chars[self.positions[idx]] = self.uppers[idx];
        }
        chars.into_iter().collect()
    }

    /// Step `combo` to the next k-combination, or to the first
    /// (k+1)-combination once the current size is exhausted.
    fn advance(&mut self) {
        let n = self.positions.len();
        let k = self.combo.len();

        // Rightmost index that can still move right.
        let pivot = (0..k).rev().find(|&i| self.combo[i] < n - k + i);

        match pivot {
            Some(i) => {
                self.combo[i] += 1;
                for j in i + 1..k {
                    self.combo[j] = self.combo[j - 1] + 1;
                }
            }
            None if k < self.max_k => {
                self.combo = (0..k + 1).collect();
            }
            None => self.done = true,
        }
    }
}

impl Iterator for CaseVariants {
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
