//! # Wordforge Types
//!
//! Core types, traits, and enums shared across all wordforge crates.
//!
//! This crate provides the fundamental building blocks for the wordforge
//! wordlist generator, including:
//!
//! - The generation budget and its optional per-word bounds
//! - The leet substitution table
//! - The suggestion source trait implemented by external word providers
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use wordforge_types::{Bound, GenerationBudget, LeetMapping};
//!
//! let budget = GenerationBudget {
//!     uppercase: Bound::AtMost(2),
//!     ..GenerationBudget::default()
//! };
//! assert!(budget.validate().is_ok());
//!
//! let leet = LeetMapping::default();
//! assert_eq!(leet.get('e'), Some('3'));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{WordlistError, Result};
pub use enums::{Bound, LogLevel};
pub use config::{GenerationBudget, LeetMapping};
pub use traits::{SuggestionRequest, SuggestionSource};
