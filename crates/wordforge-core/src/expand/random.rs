//! Random character insertion.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use wordforge_types::{GenerationBudget, Result, WordlistError};

use crate::wordset::char_len;

const PREFIX: usize = 0;
const SUFFIX: usize = 1;

/// Inserts random charset characters at weighted prefix, suffix or interior
/// positions.
#[derive(Debug, Clone)]
pub struct Inserter {
    charset: Vec<char>,
    placement: WeightedIndex<f64>,
    max_chars: usize,
    trials: usize,
    max_size: usize,
}

impl Inserter {
    /// Build an inserter from the random settings of a budget.
    pub fn new(budget: &GenerationBudget) -> Result<Self> {
        let charset = budget.charset();
        if charset.is_empty() {
            return Err(WordlistError::Config("random charset is empty".to_string()));
        }

        let placement = WeightedIndex::new(budget.random_weights)
            .map_err(|e| WordlistError::Config(format!("Invalid random weights {:?}: {}", budget.random_weights, e)))?;

        Ok(Self {
            charset,
            placement,
            max_chars: budget.random_chars,
            trials: budget.random_level,
            max_size: budget.max_size,
        })
    }

    /// Run every trial for `word`, returning the words they produced.
    ///
    /// Trials whose insertions would push the word past the maximum size are
    /// skipped, so the result can hold fewer words than there are trials.
    pub fn trials<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> Vec<String> {
        (0..self.trials)
            .filter_map(|_| self.trial(word, rng))
            .collect()
    }

    /// One trial: draw an insertion count, then insert that many characters.
    pub fn trial<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> Option<String> {
        let count = rng.gen_range(0..=self.max_chars);
        if char_len(word) + count > self.max_size {
            return None;
        }

        let mut chars: Vec<char> = word.chars().collect();
        for _ in 0..count {
            let c = self.charset[rng.gen_range(0..self.charset.len())];
            let position = self.position(chars.len(), rng);
            chars.insert(position, c);
        }

        Some(chars.into_iter().collect())
    }

    fn position<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> usize {
        match self.placement.sample(rng) {
            PREFIX => 0,
            SUFFIX => len,
            // Interior needs at least two characters to have an inside.
            _ if len < 2 => len,
            _ => rng.gen_range(1..len),
        }
    }
}
