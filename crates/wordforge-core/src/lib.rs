//! # Wordforge Core
//!
//! Wordlist generation engine: seed collection, normalization, variant
//! expansion under size budgets, estimation and output.
//!
//! This crate provides:
//!
//! - **Collection**: concurrent per-seed enrichment through a `SuggestionSource`
//! - **Normalization**: subword splitting, non-word stripping, length floor
//! - **Expansion**: case, leet and random-insertion passes gated by `max_words`
//! - **Estimation**: an upper bound on the final size for progress reporting
//! - **Output**: sorted, one-word-per-line persistence
//! - **Configuration and logging**: env file loading and the tracing subscriber
//!
//! ## Example
//!
//! ```no_run
//! use wordforge_core::{Pipeline, Settings};
//!
//! # async fn run() -> wordforge_types::Result<()> {
//! let pipeline = Pipeline::new(Settings::default(), None);
//! let report = pipeline.run(&["dragon".to_string()], |p| println!("{}: {}", p.stage, p.current)).await?;
//! wordforge_core::output::save_wordlist("wordlist.txt", &report.words)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collector;
pub mod config;
pub mod estimate;
pub mod expand;
pub mod log;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod time;
pub mod wordset;

// Re-export commonly used items
pub use config::{EnvFile, Settings};
pub use pipeline::{Pipeline, Progress, Report, Stage};
pub use wordset::{SharedWordSet, WordSet};
pub use wordforge_types::{WordlistError, Result};
