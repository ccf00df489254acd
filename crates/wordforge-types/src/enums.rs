//! Common enumerations used throughout wordforge.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use crate::errors::{WordlistError, Result};

/// Log level enumeration for the logging system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Detailed trace messages
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::None => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = WordlistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(LogLevel::None),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(WordlistError::Config(format!("Invalid log level: {}", s))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::None => write!(f, "NONE"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Trace => write!(f, "TRACE"),
        }
    }
}

/// An optional numeric cap.
///
/// Used for the per-word uppercase and leet substitution budgets, where the
/// default is to impose no limit at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bound {
    /// No limit
    #[default]
    Unbounded,
    /// At most this many
    AtMost(usize),
}

impl Bound {
    /// Whether `n` fits within the bound.
    pub fn allows(&self, n: usize) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::AtMost(max) => n <= *max,
        }
    }

    /// Clamp `n` to the bound.
    pub fn min(&self, n: usize) -> usize {
        match self {
            Bound::Unbounded => n,
            Bound::AtMost(max) => n.min(*max),
        }
    }

    /// True for `AtMost(0)`, which disables the pass it governs.
    pub fn is_zero(&self) -> bool {
        matches!(self, Bound::AtMost(0))
    }
}

impl FromStr for Bound {
    type Err = WordlistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "inf" | "infinity" | "unbounded" | "none" => Ok(Bound::Unbounded),
            other => other
                .parse::<usize>()
                .map(Bound::AtMost)
                .map_err(|_| WordlistError::Config(format!(
                    "Invalid bound '{}': expected a non-negative integer or 'inf'",
                    s
                ))),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Unbounded => write!(f, "inf"),
            Bound::AtMost(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Bound::Unbounded => serializer.serialize_str("inf"),
            Bound::AtMost(n) => serializer.serialize_u64(*n as u64),
        }
    }
}

impl<'de> Deserialize<'de> for Bound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(usize),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(n) => Ok(Bound::AtMost(n)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_parsing() {
        assert_eq!("inf".parse::<Bound>().unwrap(), Bound::Unbounded);
        assert_eq!("Unbounded".parse::<Bound>().unwrap(), Bound::Unbounded);
        assert_eq!("3".parse::<Bound>().unwrap(), Bound::AtMost(3));
        assert_eq!(" 0 ".parse::<Bound>().unwrap(), Bound::AtMost(0));
        assert!("-1".parse::<Bound>().is_err());
        assert!("lots".parse::<Bound>().is_err());
    }

    #[test]
    fn test_bound_limits() {
        assert!(Bound::Unbounded.allows(usize::MAX));
        assert!(Bound::AtMost(2).allows(2));
        assert!(!Bound::AtMost(2).allows(3));
        assert_eq!(Bound::AtMost(2).min(5), 2);
        assert_eq!(Bound::Unbounded.min(5), 5);
        assert!(Bound::AtMost(0).is_zero());
        assert!(!Bound::Unbounded.is_zero());
    }

    #[test]
    fn test_bound_serde() {
        assert_eq!(serde_json::to_string(&Bound::Unbounded).unwrap(), "\"inf\"");
        assert_eq!(serde_json::to_string(&Bound::AtMost(4)).unwrap(), "4");
        assert_eq!(serde_json::from_str::<Bound>("4").unwrap(), Bound::AtMost(4));
        assert_eq!(serde_json::from_str::<Bound>("\"inf\"").unwrap(), Bound::Unbounded);
    }

    #[test]
    fn test_log_level_directive() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::None.directive(), "off");
        assert!(LogLevel::Debug > LogLevel::Info);
    }
}
