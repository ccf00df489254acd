//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use crate::enums::Bound;
use crate::errors::{WordlistError, Result};

/// Default characters drawn from by the random-insertion pass.
pub const DEFAULT_RANDOM_CHARSET: &str = "0123456789!@$&+_-.?/+;#";

/// Default prefix/suffix/interior insertion weights.
pub const DEFAULT_RANDOM_WEIGHTS: [f64; 3] = [0.47, 0.47, 0.06];

/// Budgets bounding every stage of wordlist generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationBudget {
    /// Soft cap on the size of the final wordlist
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    /// Minimum characters per word in the final list
    #[serde(default = "default_min_size")]
    pub min_size: usize,
    /// Maximum characters per word in the final list
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Maximum uppercase characters per word
    #[serde(default)]
    pub uppercase: Bound,
    /// Maximum leet-substitutable positions per word
    #[serde(default)]
    pub leet: Bound,
    /// Maximum characters inserted by one random trial
    #[serde(default = "default_random_chars")]
    pub random_chars: usize,
    /// Characters available for random insertion
    #[serde(default = "default_random_charset")]
    pub random_charset: String,
    /// Random trials per word
    #[serde(default = "default_random_level")]
    pub random_level: usize,
    /// Weights for prefix, suffix and interior insertion
    #[serde(default = "default_random_weights")]
    pub random_weights: [f64; 3],
}

fn default_max_words() -> usize {
    10_000_000
}

fn default_min_size() -> usize {
    6
}

fn default_max_size() -> usize {
    14
}

fn default_random_chars() -> usize {
    6
}

fn default_random_charset() -> String {
    DEFAULT_RANDOM_CHARSET.to_string()
}

fn default_random_level() -> usize {
    3
}

fn default_random_weights() -> [f64; 3] {
    DEFAULT_RANDOM_WEIGHTS
}

impl Default for GenerationBudget {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            uppercase: Bound::Unbounded,
            leet: Bound::Unbounded,
            random_chars: default_random_chars(),
            random_charset: default_random_charset(),
            random_level: default_random_level(),
            random_weights: default_random_weights(),
        }
    }
}

impl GenerationBudget {
    /// Check the budget for values no run could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            crate::bail!(Config, "min-size must be at least 1");
        }
        if self.min_size > self.max_size {
            crate::bail!(Config, "min-size {} exceeds max-size {}", self.min_size, self.max_size);
        }
        if self.max_words == 0 {
            crate::bail!(Config, "max-words must be at least 1");
        }
        if self.random_weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            crate::bail!(Config, "random weights must be finite and non-negative: {:?}", self.random_weights);
        }
        if self.random_enabled() {
            if self.random_weights.iter().all(|w| *w == 0.0) {
                crate::bail!(Config, "at least one random weight must be positive");
            }
            if self.random_charset.is_empty() {
                crate::bail!(Config, "random charset is empty but random-chars is {}", self.random_chars);
            }
        }
        Ok(())
    }

    /// Whether the case-variant pass runs.
    pub fn case_enabled(&self) -> bool {
        !self.uppercase.is_zero()
    }

    /// Whether the leet-variant pass runs.
    pub fn leet_enabled(&self) -> bool {
        !self.leet.is_zero()
    }

    /// Whether the random-insertion pass runs.
    pub fn random_enabled(&self) -> bool {
        self.random_chars > 0 && self.random_level > 0
    }

    /// Random charset as individual characters.
    pub fn charset(&self) -> Vec<char> {
        self.random_charset.chars().collect()
    }

    /// Whether a word of `len` characters belongs in the final list.
    pub fn fits(&self, len: usize) -> bool {
        (self.min_size..=self.max_size).contains(&len)
    }
}

/// Character to look-alike substitution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeetMapping(BTreeMap<char, char>);

impl Default for LeetMapping {
    fn default() -> Self {
        Self(BTreeMap::from([
            ('a', '4'),
            ('b', '8'),
            ('e', '3'),
            ('g', '9'),
            ('i', '1'),
            ('l', '1'),
            ('o', '0'),
            ('s', '5'),
            ('t', '7'),
            ('z', '2'),
        ]))
    }
}

impl LeetMapping {
    /// Build a mapping from explicit pairs.
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Parse a JSON object of single-character strings, e.g. `{"a": "@"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| WordlistError::Config(format!("Invalid leet mapping: {}", e)))?;

        let mut mapping = BTreeMap::new();
        for (from, to) in raw {
            let from_char = single_char(&from)?;
            let to_char = single_char(&to)?;
            mapping.insert(from_char, to_char);
        }

        Ok(Self(mapping))
    }

    /// Substitute for exactly this character.
    pub fn get(&self, c: char) -> Option<char> {
        self.0.get(&c).copied()
    }

    /// Substitute for the lowercase form of this character.
    pub fn get_folded(&self, c: char) -> Option<char> {
        let mut lower = c.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(l), None) => self.get(l),
            _ => None,
        }
    }

    /// Number of mapped characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn single_char(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(WordlistError::Config(format!(
            "Invalid leet mapping entry '{}': expected exactly one character",
            s
        ))),
    }
}
