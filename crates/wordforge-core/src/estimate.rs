//! Upper-bound size estimation.
//!
//! The estimate only drives the progress bar and an advisory warning; it is
//! deliberately loose and never used to decide what gets generated.

use wordforge_types::{Bound, GenerationBudget, LeetMapping};

use crate::expand::case;
use crate::wordset::WordSet;

/// Estimated final wordlist size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Estimate {
    /// Sum of per-word upper bounds
    pub uncapped: u64,
    /// `uncapped` limited to the word budget
    pub capped: u64,
}

impl Estimate {
    /// Whether the budget is expected to truncate the list.
    pub fn exceeds_budget(&self) -> bool {
        self.uncapped > self.capped
    }
}

/// Estimate the size of the fully expanded list.
pub fn estimate(words: &WordSet, budget: &GenerationBudget, leet: &LeetMapping) -> Estimate {
    let uncapped = words
        .iter()
        .map(|w| word_estimate(w, budget, leet))
        .fold(0u64, u64::saturating_add);

    Estimate {
        uncapped,
        capped: uncapped.min(budget.max_words as u64),
    }
}

/// Upper bound on the words one source word can turn into.
pub fn word_estimate(word: &str, budget: &GenerationBudget, leet: &LeetMapping) -> u64 {
    let case_factor = if budget.case_enabled() {
        case_count(case::toggleable(word), budget.uppercase)
    } else {
        1
    };

    let leet_factor = if budget.leet_enabled() {
        let mapped = word.chars().filter(|c| leet.get_folded(*c).is_some()).count();
        pow2(budget.leet.min(mapped))
    } else {
        1
    };

    let random_factor = if budget.random_enabled() {
        (budget.random_level as u64)
            .saturating_mul(budget.random_chars as u64)
            .saturating_add(1)
    } else {
        1
    };

    case_factor
        .saturating_mul(leet_factor)
        .saturating_mul(random_factor)
}

/// Number of case variants of a word with `alpha` toggleable characters.
pub fn case_count(alpha: usize, bound: Bound) -> u64 {
    let max_k = bound.min(alpha);
    if max_k == alpha {
        return pow2(alpha);
    }

    let mut total = 0u64;
    let mut binomial = 1u64;
    for k in 0..=max_k {
        total = total.saturating_add(binomial);
        // C(n, k+1) = C(n, k) * (n - k) / (k + 1)
        binomial = match binomial.checked_mul((alpha - k) as u64) {
            Some(product) => product / (k as u64 + 1),
            None => return u64::MAX,
        };
    }
    total
}

fn pow2(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        1u64 << n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> WordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_case_count() {
        assert_eq!(case_count(4, Bound::AtMost(1)), 5);
        assert_eq!(case_count(4, Bound::AtMost(2)), 11);
        assert_eq!(case_count(4, Bound::Unbounded), 16);
        assert_eq!(case_count(0, Bound::Unbounded), 1);
        assert_eq!(case_count(200, Bound::Unbounded), u64::MAX);
    }

    #[test]
    fn test_scenario_estimate_is_exact_without_leet_or_random() {
        let budget = GenerationBudget {
            uppercase: Bound::AtMost(1),
            leet: Bound::AtMost(0),
            random_chars: 0,
            ..Default::default()
        };
        let est = estimate(&set(&["test"]), &budget, &LeetMapping::default());
        assert_eq!(est.uncapped, 5);
        assert!(!est.exceeds_budget());
    }

    #[test]
    fn test_factors_multiply() {
        let budget = GenerationBudget {
            uppercase: Bound::Unbounded,
            leet: Bound::AtMost(2),
            random_chars: 2,
            random_level: 3,
            ..Default::default()
        };
        // "test": 16 case variants, 2 of 4 leet positions, 1 + 3 * 2 random.
        assert_eq!(word_estimate("test", &budget, &LeetMapping::default()), 16 * 4 * 7);
    }

    #[test]
    fn test_estimate_is_capped() {
        let budget = GenerationBudget {
            max_words: 100,
            ..Default::default()
        };
        let est = estimate(&set(&["passwords", "dragonfly"]), &budget, &LeetMapping::default());
        assert_eq!(est.capped, 100);
        assert!(est.uncapped > 100);
        assert!(est.exceeds_budget());
    }

    #[test]
    fn test_estimate_bounds_actual_case_and_leet_output() {
        use crate::expand::Expander;

        let budget = GenerationBudget {
            uppercase: Bound::AtMost(2),
            leet: Bound::AtMost(2),
            random_chars: 0,
            ..Default::default()
        };
        let leet = LeetMapping::default();
        let input = set(&["letmein", "dragon", "monkey"]);

        let est = estimate(&input, &budget, &leet);
        let expander = Expander::new(&budget, &leet);
        let out = expander.leet_pass(expander.case_pass(input).words).words;
        assert!(out.len() as u64 <= est.uncapped);
    }
}
