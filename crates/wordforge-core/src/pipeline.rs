//! Wordlist generation pipeline.
//!
//! Stages run in a fixed order: collect seeds, normalize, expand (uppercase,
//! leet, random insertion) and filter to the configured sizes. Each stage
//! takes an owned word set and returns a new one; the caller observes
//! progress through a callback invoked after every stage.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wordforge_types::{Result, SuggestionSource, WordlistError};

use crate::collector::SeedCollector;
use crate::config::Settings;
use crate::estimate::{estimate, Estimate};
use crate::expand::{Expander, Expansion, Pass, PassOutcome};
use crate::normalize::{normalize, retain_lengths, MIN_TOKEN_LEN};
use crate::wordset::{char_len, sorted, SharedWordSet, WordSet};

/// A pipeline stage, reported to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Seeds and suggestions gathered
    Collected,
    /// Tokens split, cleaned and length-filtered
    Normalized,
    /// Case variants added
    Uppercase,
    /// Leet variants added
    Leet,
    /// Random insertions added
    Random,
    /// Final size filter applied
    Filtered,
}

impl From<Pass> for Stage {
    fn from(pass: Pass) -> Self {
        match pass {
            Pass::Case => Stage::Uppercase,
            Pass::Leet => Stage::Leet,
            Pass::Random => Stage::Random,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Collected => write!(f, "collecting seeds"),
            Stage::Normalized => write!(f, "normalizing"),
            Stage::Uppercase => write!(f, "uppercase variants"),
            Stage::Leet => write!(f, "leet variants"),
            Stage::Random => write!(f, "random insertion"),
            Stage::Filtered => write!(f, "filtering"),
        }
    }
}

/// Snapshot passed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Stage just completed
    pub stage: Stage,
    /// Words held after the stage
    pub current: usize,
    /// Estimated final size
    pub estimated: u64,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct Report {
    /// Final wordlist, sorted
    pub words: Vec<String>,
    /// Size estimate computed after normalization
    pub estimate: Estimate,
    /// Whether the word budget cut expansion short
    pub budget_reached: bool,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Generates a wordlist from seeds.
pub struct Pipeline {
    settings: Arc<Settings>,
    source: Option<Arc<dyn SuggestionSource>>,
}

impl Pipeline {
    /// Create a pipeline. Without a source, seeds are not enriched.
    pub fn new(settings: Settings, source: Option<Arc<dyn SuggestionSource>>) -> Self {
        Self {
            settings: Arc::new(settings),
            source,
        }
    }

    /// Settings this pipeline runs with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run every stage over `seeds`.
    ///
    /// Fails before doing any work if no usable seed is given or the settings
    /// are invalid. Suggestion failures never fail the run.
    pub async fn run<F>(&self, seeds: &[String], mut on_progress: F) -> Result<Report>
    where
        F: FnMut(Progress),
    {
        let start = Instant::now();
        let seeds = clean_seeds(seeds)?;
        self.settings.validate()?;
        let budget = &self.settings.budget;

        tracing::info!("Generating wordlist for {:?}", seeds);

        let collected = SharedWordSet::new();
        SeedCollector::new(self.settings.collector(), self.source.clone())
            .collect(&seeds, &collected)
            .await;
        on_progress(Progress {
            stage: Stage::Collected,
            current: collected.len(),
            estimated: (seeds.len() as u64).saturating_mul(self.settings.number as u64 + 1),
        });

        let mut words = retain_lengths(normalize(&collected.take()), MIN_TOKEN_LEN, budget.max_size);
        let estimate = estimate(&words, budget, &self.settings.leet);
        tracing::debug!("Estimated wordlist size: {} (uncapped {})", estimate.capped, estimate.uncapped);
        if estimate.exceeds_budget() {
            tracing::warn!(
                "Up to {} words could be generated but the limit is {}. The wordlist will be truncated.",
                estimate.uncapped,
                budget.max_words
            );
        }
        on_progress(Progress {
            stage: Stage::Normalized,
            current: words.len(),
            estimated: estimate.capped,
        });

        let mut budget_reached = false;
        for pass in Pass::ALL {
            if !pass.enabled(budget) {
                continue;
            }
            if budget_reached {
                tracing::debug!("Skipping {} pass: word budget reached", pass);
                continue;
            }
            if words.len() >= budget.max_words {
                tracing::warn!(
                    "Wordlist has reached the limit of {} words. Skipping the {} pass.",
                    budget.max_words,
                    pass
                );
                budget_reached = true;
                continue;
            }

            let expansion = self.expand(pass, words).await?;
            budget_reached = expansion.outcome == PassOutcome::BudgetReached;
            words = expansion.words;

            on_progress(Progress {
                stage: pass.into(),
                current: words.len(),
                estimated: estimate.capped.max(words.len() as u64),
            });
        }

        words.retain(|w| budget.fits(char_len(w)));
        on_progress(Progress {
            stage: Stage::Filtered,
            current: words.len(),
            estimated: words.len() as u64,
        });

        let elapsed = start.elapsed();
        tracing::debug!("Generated {} words in {:?}", words.len(), elapsed);

        Ok(Report {
            words: sorted(words),
            estimate,
            budget_reached,
            elapsed,
        })
    }

    /// Run one expansion pass on a blocking thread.
    async fn expand(&self, pass: Pass, words: WordSet) -> Result<Expansion> {
        let settings = self.settings.clone();

        tokio::task::spawn_blocking(move || {
            let expander = Expander::new(&settings.budget, &settings.leet).with_workers(settings.workers);
            match pass {
                Pass::Case => Ok(expander.case_pass(words)),
                Pass::Leet => Ok(expander.leet_pass(words)),
                Pass::Random => {
                    let mut rng = match settings.rng_seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_entropy(),
                    };
                    expander.random_pass(words, &mut rng)
                }
            }
        })
        .await
        .map_err(|e| WordlistError::Other(format!("The {} pass failed: {}", pass, e)))?
    }
}

/// Trim seeds and drop blank ones, failing if none remain.
fn clean_seeds(seeds: &[String]) -> Result<Vec<String>> {
    let cleaned: Vec<String> = seeds
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if cleaned.is_empty() {
        wordforge_types::bail!(
            Config,
            "No words provided. Use -w or --words argument followed by one or more words."
        );
    }

    Ok(cleaned)
}
