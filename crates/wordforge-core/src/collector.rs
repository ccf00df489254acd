//! Seed collection and enrichment.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use wordforge_types::{SuggestionRequest, SuggestionSource};

use crate::wordset::{SharedWordSet, WordSet};

/// Settings controlling seed enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSettings {
    /// Suggestions requested per seed
    pub number: usize,
    /// Minimum size passed on to the suggestion source
    pub min_size: usize,
    /// Maximum size passed on to the suggestion source
    pub max_size: usize,
    /// Maximum concurrent seed tasks
    pub workers: usize,
}

/// Collects seeds, optionally enriched with suggested related words.
///
/// One task runs per seed and at most `workers` run at once. A seed whose
/// suggestion request fails still contributes itself.
pub struct SeedCollector {
    settings: CollectorSettings,
    source: Option<Arc<dyn SuggestionSource>>,
}

impl SeedCollector {
    /// Create a collector; without a source every seed yields only itself.
    pub fn new(settings: CollectorSettings, source: Option<Arc<dyn SuggestionSource>>) -> Self {
        Self { settings, source }
    }

    /// Collect every seed into `into`.
    pub async fn collect(&self, seeds: &[String], into: &SharedWordSet) {
        let semaphore = Arc::new(Semaphore::new(self.settings.workers.max(1)));
        let mut tasks = JoinSet::new();

        for seed in seeds {
            let semaphore = semaphore.clone();
            let source = self.source.clone();
            let request = SuggestionRequest {
                seed: seed.clone(),
                count: self.settings.number,
                min_size: self.settings.min_size,
                max_size: self.settings.max_size,
            };
            let into = into.clone();

            tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only fails on shutdown.
                let _permit = semaphore.acquire_owned().await.ok();
                let words = collect_seed(source.as_deref(), &request).await;
                into.extend(words);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Seed task failed: {}", e);
            }
        }
    }
}

/// Collect one seed and its suggestions.
pub async fn collect_seed(source: Option<&dyn SuggestionSource>, request: &SuggestionRequest) -> WordSet {
    let mut words = WordSet::from([request.seed.clone()]);

    let source = match source {
        Some(source) if request.count > 0 => source,
        _ => return words,
    };

    match source.suggest(request).await {
        Ok(suggestions) => {
            tracing::info!(
                "Words generated from {} based on the word {}: {:?}",
                source.name(),
                request.seed,
                suggestions
            );
            words.extend(suggestions);
        }
        Err(e) => {
            tracing::warn!("No suggestions for '{}': {}", request.seed, e);
        }
    }

    words
}
