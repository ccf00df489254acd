//! Error types for wordforge operations.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for wordforge operations.
///
/// Only configuration errors and the final write abort a run. Suggestion
/// service failures are isolated to the seed that triggered them.
#[derive(Error, Debug)]
pub enum WordlistError {
    /// Invalid or missing configuration, detected before any work starts
    #[error("Configuration error: {0}")]
    Config(String),

    /// No credential available for the suggestion service
    #[error("API key is not set. Set API_KEY in the .env file or pass it with --key")]
    CredentialMissing,

    /// Suggestion service failure (timeout, bad status, malformed payload)
    #[error("Suggestion service error: {0}")]
    Service(String),

    /// Failure writing the final wordlist
    #[error("Failed to write wordlist to {}: {source}", path.display())]
    Persistence {
        /// Output path that could not be written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl WordlistError {
    /// Whether this error must stop the whole run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WordlistError::Service(_) | WordlistError::CredentialMissing)
    }
}

/// A specialized Result type for wordforge operations.
pub type Result<T> = std::result::Result<T, WordlistError>;

/// Helper macro to bail out with a WordlistError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if min_size > max_size {
///     bail!(Config, "min-size {} exceeds max-size {}", min_size, max_size);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::WordlistError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::WordlistError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::WordlistError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::WordlistError::Other(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        assert!(WordlistError::Config("no seeds".to_string()).is_fatal());
        assert!(!WordlistError::Service("503".to_string()).is_fatal());
        assert!(!WordlistError::CredentialMissing.is_fatal());

        let err = WordlistError::Persistence {
            path: PathBuf::from("/nope/list.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("/nope/list.txt"));
    }

    fn check_sizes(min: usize, max: usize) -> Result<()> {
        if min > max {
            bail!(Config, "min-size {} exceeds max-size {}", min, max);
        }
        Ok(())
    }

    #[test]
    fn test_bail_macro() {
        assert!(check_sizes(3, 8).is_ok());
        let err = check_sizes(9, 8).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: min-size 9 exceeds max-size 8");
    }
}
