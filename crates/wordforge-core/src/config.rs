//! Configuration management for wordforge.
//!
//! Run settings come from two layers, resolved in this priority order:
//! 1. Process environment variables and command-line flags
//! 2. Values loaded from a `KEY=VALUE` env file (`.env` by default)
//!
//! The env file never overrides a variable the process already has, so a key
//! exported in the shell wins over one written in the file.
//!
//! ## Example
//!
//! ```no_run
//! use wordforge_core::config::EnvFile;
//!
//! if let Some(env) = EnvFile::load(".env")? {
//!     env.apply();
//! }
//! # Ok::<(), wordforge_types::WordlistError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wordforge_types::{GenerationBudget, LeetMapping, Result, WordlistError};

use crate::collector::CollectorSettings;

/// Default env file consulted before argument parsing.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Environment variable holding the suggestion service credential.
pub const API_KEY_VAR: &str = "API_KEY";

/// Parsed `KEY=VALUE` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    /// Parse env file content.
    ///
    /// Blank lines, `#` comments and lines without `=` are skipped. An
    /// optional `export ` prefix and matching surrounding quotes are removed.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let line = line.strip_prefix("export ").unwrap_or(line);
                let (key, value) = line.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), unquote(value.trim()).to_string()))
            })
            .collect();

        Self { entries }
    }

    /// Load an env file, returning `None` if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| {
            WordlistError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        Ok(Some(Self::parse(&content)))
    }

    /// Export entries into the process environment, skipping variables that
    /// are already set. Returns how many were exported.
    ///
    /// Call this before spawning threads that read the environment.
    pub fn apply(&self) -> usize {
        let mut applied = 0;
        for (key, value) in &self.entries {
            if std::env::var_os(key).is_none() {
                std::env::set_var(key, value);
                applied += 1;
            }
        }
        applied
    }

    /// Value for `key`, if the file defines it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file defined nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Mask a credential for logging, keeping the first three and last four
/// characters.
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 7 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Everything a generation run needs besides the seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Size and substitution budgets
    #[serde(default)]
    pub budget: GenerationBudget,
    /// Leet substitution table
    #[serde(default)]
    pub leet: LeetMapping,
    /// Suggestions requested per seed
    #[serde(default = "default_number")]
    pub number: usize,
    /// Worker limit for seed tasks and expansion threads
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Seed for the random-insertion pass, for reproducible runs
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_number() -> usize {
    20
}

/// Available parallelism, falling back to a single worker.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            budget: GenerationBudget::default(),
            leet: LeetMapping::default(),
            number: default_number(),
            workers: default_workers(),
            rng_seed: None,
        }
    }
}

impl Settings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        self.budget.validate()?;
        if self.workers == 0 {
            wordforge_types::bail!(Config, "workers must be at least 1");
        }
        Ok(())
    }

    /// Settings for the seed collector.
    pub fn collector(&self) -> CollectorSettings {
        CollectorSettings {
            number: self.number,
            min_size: self.budget.min_size,
            max_size: self.budget.max_size,
            workers: self.workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_file_parsing() {
        let env = EnvFile::parse(
            "# credentials\n\
             API_KEY=sk-abc123\n\
             \n\
             export MODEL=\"gpt-4o-mini\"\n\
             QUOTED='single'\n\
             not a pair\n\
             =novalue\n\
             EMPTY=\n",
        );

        assert_eq!(env.len(), 4);
        assert_eq!(env.get("API_KEY"), Some("sk-abc123"));
        assert_eq!(env.get("MODEL"), Some("gpt-4o-mini"));
        assert_eq!(env.get("QUOTED"), Some("single"));
        assert_eq!(env.get("EMPTY"), Some(""));
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let env = EnvFile::parse("TOKEN=a=b=c");
        assert_eq!(env.get("TOKEN"), Some("a=b=c"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EnvFile::load(dir.path().join(".env")).unwrap().is_none());
    }

    #[test]
    fn test_apply_does_not_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "WORDFORGE_TEST_PRESET=from-file").unwrap();
        writeln!(file, "WORDFORGE_TEST_FRESH=from-file").unwrap();

        std::env::set_var("WORDFORGE_TEST_PRESET", "from-shell");
        std::env::remove_var("WORDFORGE_TEST_FRESH");

        let env = EnvFile::load(file.path()).unwrap().unwrap();
        assert_eq!(env.apply(), 1);
        assert_eq!(std::env::var("WORDFORGE_TEST_PRESET").unwrap(), "from-shell");
        assert_eq!(std::env::var("WORDFORGE_TEST_FRESH").unwrap(), "from-file");
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("sk-1234567890abcd"), "sk-...abcd");
        assert_eq!(redact("short"), "*****");
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.workers >= 1);

        settings.workers = 0;
        assert!(settings.validate().is_err());

        let collector = Settings::default().collector();
        assert_eq!(collector.number, 20);
        assert_eq!(collector.max_size, 14);
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings: Settings = serde_json::from_str(
            r#"{"budget": {"max_size": 10, "uppercase": 2, "leet": "inf"}, "leet": {"a": "@"}, "number": 5}"#,
        )
        .unwrap();

        assert_eq!(settings.budget.max_size, 10);
        assert_eq!(settings.budget.min_size, 6);
        assert_eq!(settings.budget.uppercase, wordforge_types::Bound::AtMost(2));
        assert_eq!(settings.budget.leet, wordforge_types::Bound::Unbounded);
        assert_eq!(settings.leet.get('a'), Some('@'));
        assert_eq!(settings.leet.len(), 1);
        assert_eq!(settings.number, 5);
        assert_eq!(settings.rng_seed, None);
        assert!(settings.validate().is_ok());
    }
}
