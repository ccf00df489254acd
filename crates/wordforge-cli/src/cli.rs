//! CLI structure and argument handling.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use wordforge_core::config::{default_workers, redact, API_KEY_VAR, DEFAULT_ENV_FILE};
use wordforge_core::{output, time, Pipeline, Settings};
use wordforge_services::openai::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use wordforge_services::{OpenAiClient, OpenAiConfig};
use wordforge_types::config::{DEFAULT_RANDOM_CHARSET, DEFAULT_RANDOM_WEIGHTS};
use wordforge_types::{Bound, GenerationBudget, LeetMapping, LogLevel, SuggestionSource, WordlistError};

use crate::ui::progress;

#[derive(Parser, Debug, Clone)]
#[command(name = "wordforge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Themed wordlist generator with case, leet and random-insertion variants", long_about = None)]
pub struct Cli {
    /// Seed words the wordlist is built around
    #[arg(short, long, num_args = 1.., value_name = "WORD")]
    pub words: Vec<String>,

    /// Related words requested per seed
    #[arg(short, long, default_value_t = 20)]
    pub number: usize,

    /// Minimum word length
    #[arg(long, default_value_t = 6)]
    pub min_size: usize,

    /// Maximum word length
    #[arg(long, default_value_t = 14)]
    pub max_size: usize,

    /// Maximum number of words in the list
    #[arg(short = 'm', long, default_value_t = 10_000_000)]
    pub max_words: usize,

    /// Maximum uppercase characters per word ("inf" for no limit)
    #[arg(short, long, default_value = "inf")]
    pub uppercase: Bound,

    /// Maximum leet substitutions per word ("inf" for no limit)
    #[arg(short, long, default_value = "inf")]
    pub leet: Bound,

    /// Leet substitution table as a JSON object, e.g. '{"a":"4","e":"3"}'
    #[arg(long, value_name = "JSON")]
    pub leet_mapping: Option<String>,

    /// Maximum characters inserted by one random trial
    #[arg(short, long, default_value_t = 6)]
    pub random_chars: usize,

    /// Characters used for random insertion
    #[arg(long, default_value = DEFAULT_RANDOM_CHARSET)]
    pub random_charset: String,

    /// Random trials per word
    #[arg(long, default_value_t = 3)]
    pub random_level: usize,

    /// Prefix, suffix and interior insertion weights
    #[arg(long, num_args = 3, value_names = ["PREFIX", "SUFFIX", "INTERIOR"], default_values_t = DEFAULT_RANDOM_WEIGHTS)]
    pub random_weights: Vec<f64>,

    /// Suggestion service API key
    #[arg(short, long, env = API_KEY_VAR, hide_env_values = true)]
    pub key: Option<String>,

    /// Chat model used for suggestions
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Chat completions endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Worker limit for seed requests and expansion (defaults to available cores)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Seed for random insertion, for reproducible lists
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// KEY=VALUE file loaded before anything else
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Fail instead of falling back to seed-only mode when no API key is set
    #[arg(long)]
    pub strict: bool,

    /// Output file
    #[arg(short, long, default_value = "wordlist.txt")]
    pub output: PathBuf,

    /// Enable debug output
    #[arg(short, long, conflicts_with = "silent")]
    pub debug: bool,

    /// Only report errors and hide the progress bar
    #[arg(short, long)]
    pub silent: bool,
}

impl Cli {
    /// Log level selected by `--debug` / `--silent`.
    pub fn log_level(&self) -> LogLevel {
        if self.silent {
            LogLevel::Error
        } else if self.debug {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }

    /// Generation settings described by the arguments.
    pub fn settings(&self) -> wordforge_types::Result<Settings> {
        let leet = match &self.leet_mapping {
            Some(json) => LeetMapping::from_json(json)?,
            None => LeetMapping::default(),
        };

        let random_weights: [f64; 3] = self.random_weights.as_slice().try_into().map_err(|_| {
            WordlistError::Config(format!(
                "--random-weights takes exactly 3 values, got {}",
                self.random_weights.len()
            ))
        })?;

        let budget = GenerationBudget {
            max_words: self.max_words,
            min_size: self.min_size,
            max_size: self.max_size,
            uppercase: self.uppercase,
            leet: self.leet,
            random_chars: self.random_chars,
            random_charset: self.random_charset.clone(),
            random_level: self.random_level,
            random_weights,
        };

        let settings = Settings {
            budget,
            leet,
            number: self.number,
            workers: self.workers.unwrap_or_else(default_workers),
            rng_seed: self.rng_seed,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// API key, if one was given and is not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    /// Suggestion source for this run, or `None` for seed-only mode.
    pub fn source(&self) -> wordforge_types::Result<Option<Arc<dyn SuggestionSource>>> {
        if self.number == 0 {
            tracing::debug!("No suggestions requested; using the given words only");
            return Ok(None);
        }

        match self.api_key() {
            Some(key) => {
                let client = OpenAiClient::new(OpenAiConfig {
                    api_url: self.api_url.clone(),
                    api_key: key.to_string(),
                    model: self.model.clone(),
                    timeout: Duration::from_secs(self.timeout),
                })?;
                Ok(Some(Arc::new(client)))
            }
            None if self.strict => Err(WordlistError::CredentialMissing),
            None => {
                tracing::warn!(
                    "{}. Only the given words will be used.",
                    WordlistError::CredentialMissing
                );
                Ok(None)
            }
        }
    }

    /// Arguments as logged, with the key masked.
    fn redacted(&self) -> Self {
        let mut shown = self.clone();
        shown.key = shown.key.as_deref().map(redact);
        shown
    }

    pub async fn execute(&self) -> Result<()> {
        tracing::debug!("Arguments: {:?}", self.redacted());

        let settings = self.settings()?;
        let source = self.source()?;

        let pipeline = Pipeline::new(settings, source);
        let pb = progress::bar(self.silent);
        let result = pipeline
            .run(&self.words, |p| progress::update(&pb, &p))
            .await;
        pb.finish_and_clear();
        let report = result?;

        if report.budget_reached {
            tracing::warn!(
                "Stopped expanding at the limit of {} words",
                pipeline.settings().budget.max_words
            );
        }

        output::save_wordlist(&self.output, &report.words)?;
        tracing::info!("Wordlist generated in {}", time::pretty_duration(report.elapsed));

        Ok(())
    }
}

/// Find `--env-file` in raw arguments, before clap runs.
pub fn env_file_arg(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }
        if arg == "--env-file" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--env-file=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}
