//! # Wordforge Services
//!
//! External word suggestion clients for wordforge.
//!
//! This crate provides:
//! - **OpenAI**: chat completions client implementing `SuggestionSource`
//! - **Extraction**: tolerant parsing of list-shaped model output into words

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extract;
pub mod openai;

pub use extract::words_from_text;
pub use openai::{OpenAiClient, OpenAiConfig};
