//! Core trait definitions for wordforge abstractions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::errors::Result;

/// A request for words related to one seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Theme word the suggestions should relate to
    pub seed: String,
    /// Number of words requested
    pub count: usize,
    /// Minimum characters per suggested word
    pub min_size: usize,
    /// Maximum characters per suggested word
    pub max_size: usize,
}

/// Trait for external word suggestion sources (language models, thesauri, ...).
///
/// Implementers return discrete, lowercase candidate words. Failures are
/// reported as `WordlistError::Service` and never abort a run; callers fall
/// back to the seed alone.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Fetch words related to the request's seed.
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<String>>;

    /// Get the source name used in diagnostics (e.g., "openai").
    fn name(&self) -> &str;
}
