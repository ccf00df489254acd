//! Variant expansion.
//!
//! Three passes grow the normalized word set: case permutation, leet
//! substitution and random insertion. Each pass is a pure per-word transform
//! whose results are unioned with its input, so words can be processed in any
//! order and split across worker threads without changing the result.
//!
//! Every pass is gated by the word budget. Variants are generated lazily and
//! buffered per worker; a buffer is flushed into the shared output whenever it
//! fills the room that was left at the last check or reaches
//! `RECHECK_INTERVAL` variants, and the room is re-read after every flush. A
//! worker stops, mid-word if need be, once no room is left.
//!
//! The size check and the flush that follows are separate critical sections,
//! so the budget is a soft cap. Unflushed variants never exceed
//! `RECHECK_INTERVAL` per worker, which bounds the overshoot by
//! `workers * RECHECK_INTERVAL`.

pub mod case;
pub mod leet;
pub mod random;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use wordforge_types::{GenerationBudget, LeetMapping, Result};

use crate::wordset::{SharedWordSet, WordSet};

pub use random::Inserter;

/// How often, in buffered variants, a worker re-reads the shared size.
const RECHECK_INTERVAL: usize = 4096;

/// Identifies an expansion pass in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Case permutations
    Case,
    /// Leet substitutions
    Leet,
    /// Random character insertion
    Random,
}

impl Pass {
    /// Every pass, in the order they run.
    pub const ALL: [Pass; 3] = [Pass::Case, Pass::Leet, Pass::Random];

    /// Whether `budget` enables this pass.
    pub fn enabled(&self, budget: &GenerationBudget) -> bool {
        match self {
            Pass::Case => budget.case_enabled(),
            Pass::Leet => budget.leet_enabled(),
            Pass::Random => budget.random_enabled(),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Case => write!(f, "uppercase"),
            Pass::Leet => write!(f, "leet"),
            Pass::Random => write!(f, "random insertion"),
        }
    }
}

/// How a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Every source word was expanded
    Completed,
    /// The word budget was reached and remaining words were skipped
    BudgetReached,
}

/// Output of one expansion pass.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// Input words plus every variant the pass produced
    pub words: WordSet,
    /// Whether the pass ran to completion
    pub outcome: PassOutcome,
}

impl Expansion {
    fn skipped(words: WordSet) -> Self {
        Self {
            words,
            outcome: PassOutcome::Completed,
        }
    }
}

/// Runs the expansion passes over a word set.
#[derive(Debug, Clone)]
pub struct Expander<'a> {
    budget: &'a GenerationBudget,
    leet: &'a LeetMapping,
    workers: usize,
}

impl<'a> Expander<'a> {
    /// Create a single-threaded expander.
    pub fn new(budget: &'a GenerationBudget, leet: &'a LeetMapping) -> Self {
        Self {
            budget,
            leet,
            workers: 1,
        }
    }

    /// Split each pass across `workers` threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Add every case variant within the uppercase budget.
    pub fn case_pass(&self, words: WordSet) -> Expansion {
        if !self.budget.case_enabled() {
            return Expansion::skipped(words);
        }
        let bound = self.budget.uppercase;
        self.run(Pass::Case, words, |_| (), |_, word| case::variants(word, bound))
    }

    /// Add every leet variant within the leet budget.
    pub fn leet_pass(&self, words: WordSet) -> Expansion {
        if !self.budget.leet_enabled() {
            return Expansion::skipped(words);
        }
        let bound = self.budget.leet;
        let mapping = self.leet;
        self.run(Pass::Leet, words, |_| (), |_, word| leet::variants(word, mapping, bound))
    }

    /// Add randomly padded variants.
    ///
    /// Each worker draws from its own generator seeded from `rng`, so a
    /// seeded `rng` and a fixed worker count give reproducible output.
    pub fn random_pass<R: Rng + ?Sized>(&self, words: WordSet, rng: &mut R) -> Result<Expansion> {
        if !self.budget.random_enabled() {
            return Ok(Expansion::skipped(words));
        }
        let inserter = Inserter::new(self.budget)?;
        let seeds: Vec<u64> = (0..self.workers).map(|_| rng.gen()).collect();

        Ok(self.run(
            Pass::Random,
            words,
            |worker| StdRng::seed_from_u64(seeds[worker]),
            |worker_rng, word| inserter.trials(word, worker_rng).into_iter(),
        ))
    }

    fn run<S, I, M, F>(&self, pass: Pass, words: WordSet, make_state: M, expand: F) -> Expansion
    where
        M: Fn(usize) -> S + Sync,
        F: Fn(&mut S, &str) -> I + Sync,
        I: Iterator<Item = String>,
    {
        let max_words = self.budget.max_words;

        // Sorted so a seeded random pass visits words in a stable order.
        let mut sources: Vec<String> = words.iter().cloned().collect();
        sources.sort_unstable();

        let output = SharedWordSet::from_set(words);
        let exhausted = AtomicBool::new(false);

        if sources.is_empty() {
            return Expansion::skipped(output.take());
        }

        let chunk_size = sources.len().div_ceil(self.workers);
        tracing::debug!(
            "Running {} pass over {} words with {} worker(s)",
            pass,
            sources.len(),
            sources.len().div_ceil(chunk_size)
        );

        std::thread::scope(|scope| {
            for (worker, chunk) in sources.chunks(chunk_size).enumerate() {
                let output = &output;
                let exhausted = &exhausted;
                let make_state = &make_state;
                let expand = &expand;

                scope.spawn(move || {
                    let mut state = make_state(worker);
                    for word in chunk {
                        if exhausted.load(Ordering::Relaxed) {
                            return;
                        }

                        let mut room = max_words.saturating_sub(output.len());
                        if room == 0 {
                            mark_exhausted(exhausted, pass, max_words);
                            return;
                        }

                        let mut buffer = Vec::new();
                        for variant in expand(&mut state, word) {
                            buffer.push(variant);
                            if buffer.len() >= room.min(RECHECK_INTERVAL) {
                                output.extend(buffer.drain(..));
                                room = max_words.saturating_sub(output.len());
                                if room == 0 {
                                    mark_exhausted(exhausted, pass, max_words);
                                    return;
                                }
                            }
                        }
                        output.extend(buffer);
                    }
                });
            }
        });

        let outcome = if exhausted.load(Ordering::Relaxed) {
            PassOutcome::BudgetReached
        } else {
            PassOutcome::Completed
        };

        Expansion {
            words: output.take(),
            outcome,
        }
    }
}

/// Flag the pass as out of budget, warning only on the first call.
fn mark_exhausted(exhausted: &AtomicBool, pass: Pass, max_words: usize) {
    if !exhausted.swap(true, Ordering::Relaxed) {
        tracing::warn!(
            "Wordlist has reached the limit of {} words. Stopping the {} pass.",
            max_words,
            pass
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordforge_types::Bound;

    fn set(words: &[&str]) -> WordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn budget() -> GenerationBudget {
        GenerationBudget {
            min_size: 3,
            max_size: 8,
            uppercase: Bound::AtMost(1),
            leet: Bound::AtMost(0),
            random_chars: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_case_pass_single_word() {
        let budget = budget();
        let leet = LeetMapping::default();
        let expansion = Expander::new(&budget, &leet).case_pass(set(&["test"]));

        assert_eq!(expansion.outcome, PassOutcome::Completed);
        assert_eq!(expansion.words, set(&["test", "Test", "tEst", "teSt", "tesT"]));
    }

    #[test]
    fn test_disabled_passes_return_input() {
        let budget = budget();
        let leet = LeetMapping::default();
        let expander = Expander::new(&budget, &leet);
        let input = set(&["test", "word"]);

        assert_eq!(expander.leet_pass(input.clone()).words, input);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(expander.random_pass(input.clone(), &mut rng).unwrap().words, input);
    }

    #[test]
    fn test_passes_union_with_input() {
        let budget = GenerationBudget {
            leet: Bound::AtMost(1),
            ..budget()
        };
        let leet = LeetMapping::default();
        let out = Expander::new(&budget, &leet).leet_pass(set(&["xyz", "test"])).words;
        assert_eq!(out, set(&["xyz", "test", "7est"]));
    }

    #[test]
    fn test_worker_count_does_not_change_result() {
        let budget = GenerationBudget {
            uppercase: Bound::AtMost(2),
            leet: Bound::AtMost(2),
            ..budget()
        };
        let leet = LeetMapping::default();
        let input = set(&["alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf"]);

        let single = Expander::new(&budget, &leet);
        let multi = Expander::new(&budget, &leet).with_workers(4);

        let a = single.leet_pass(single.case_pass(input.clone()).words).words;
        let b = multi.leet_pass(multi.case_pass(input).words).words;
        assert_eq!(a, b);
    }

    #[test]
    fn test_budget_stops_unprocessed_words() {
        let budget = GenerationBudget {
            max_words: 10,
            uppercase: Bound::Unbounded,
            ..budget()
        };
        let leet = LeetMapping::default();
        let input = set(&["abcdefgh", "ijklmnop", "qrstuvwx"]);

        let expansion = Expander::new(&budget, &leet).case_pass(input);
        assert_eq!(expansion.outcome, PassOutcome::BudgetReached);
        assert_eq!(expansion.words.len(), 10);
    }

    #[test]
    fn test_parallel_workers_share_the_budget() {
        let budget = GenerationBudget {
            max_words: 200_000,
            max_size: 64,
            uppercase: Bound::Unbounded,
            ..budget()
        };
        let leet = LeetMapping::default();
        let workers = 8;
        // Each word alone has 2^20 case variants.
        let input: WordSet = (0..workers).map(|i| format!("abcdefghijklmnopqrst{}", i)).collect();

        let expansion = Expander::new(&budget, &leet).with_workers(workers).case_pass(input);
        assert_eq!(expansion.outcome, PassOutcome::BudgetReached);
        assert!(
            expansion.words.len() <= 200_000 + workers * RECHECK_INTERVAL,
            "got {}",
            expansion.words.len()
        );
    }

    #[test]
    fn test_long_word_is_cut_mid_enumeration() {
        let budget = GenerationBudget {
            max_words: 1_000,
            max_size: 64,
            uppercase: Bound::Unbounded,
            ..budget()
        };
        let leet = LeetMapping::default();
        // 2^40 case variants: this only terminates if enumeration stops early.
        let input = set(&[&"a".repeat(40)]);

        let expansion = Expander::new(&budget, &leet).case_pass(input);
        assert_eq!(expansion.outcome, PassOutcome::BudgetReached);
        assert!(expansion.words.len() <= 1_000);
    }

    #[test]
    fn test_already_full_input_skips_pass() {
        let budget = GenerationBudget {
            max_words: 2,
            ..budget()
        };
        let leet = LeetMapping::default();
        let input = set(&["one1", "two2", "three3"]);

        let expansion = Expander::new(&budget, &leet).with_workers(2).case_pass(input.clone());
        assert_eq!(expansion.outcome, PassOutcome::BudgetReached);
        assert_eq!(expansion.words, input);
    }

    #[test]
    fn test_random_pass_is_seeded() {
        let budget = GenerationBudget {
            random_chars: 2,
            random_level: 3,
            max_size: 12,
            ..budget()
        };
        let leet = LeetMapping::default();
        let expander = Expander::new(&budget, &leet).with_workers(2);
        let input = set(&["alpha", "bravo", "charlie"]);

        let a = expander.random_pass(input.clone(), &mut StdRng::seed_from_u64(5)).unwrap();
        let b = expander.random_pass(input.clone(), &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a.words, b.words);
        assert!(a.words.is_superset(&input));
        assert!(a.words.iter().all(|w| w.chars().count() <= 12));
    }
}
