//! OpenAI chat completions client implementation.

use crate::extract::words_from_text;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;
use wordforge_types::{Result, SuggestionRequest, SuggestionSource, WordlistError};

/// Default chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Context window shared by the prompt and the completion.
const CONTEXT_TOKENS: usize = 4096;

/// OpenAI client configuration.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Chat completions endpoint
    pub api_url: String,
    /// Bearer API key
    pub api_key: String,
    /// Chat model name
    pub model: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Configuration with default endpoint, model and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Chat completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Word suggestion source backed by an OpenAI-compatible chat endpoint.
pub struct OpenAiClient {
    config: OpenAiConfig,
    endpoint: Url,
    client: Client,
}

impl OpenAiClient {
    /// Create a new OpenAI client.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.api_url)
            .map_err(|e| WordlistError::Config(format!("Invalid API URL '{}': {}", config.api_url, e)))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("wordforge/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| WordlistError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, endpoint, client })
    }

    /// Prompt asking for `count` words themed on the seed.
    pub fn prompt(request: &SuggestionRequest) -> String {
        format!(
            "You are a word generator tool that generates {} words related to the theme {}. \
             Each word must have a minimum of {} and a maximum of {} characters.",
            request.count, request.seed, request.min_size, request.max_size
        )
    }

    /// Completion budget left after the prompt, never below one token.
    ///
    /// The prompt's character count stands in for its token count.
    pub fn max_tokens(prompt: &str) -> usize {
        CONTEXT_TOKENS.saturating_sub(prompt.chars().count()).max(1)
    }

    /// Send one prompt and return the first choice's text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens: Self::max_tokens(prompt),
        };

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| WordlistError::Service(format!("Request to {} failed: {}", self.endpoint, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_else(|_| "unknown error".to_string());
            return Err(WordlistError::Service(format!(
                "Completion request failed ({}): {}",
                status, text
            )));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| WordlistError::Service(format!("Malformed completion response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| WordlistError::Service("Completion response has no content".to_string()))
    }
}

#[async_trait]
impl SuggestionSource for OpenAiClient {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<String>> {
        let prompt = Self::prompt(request);
        tracing::debug!("Requesting {} words for '{}' from {}", request.count, request.seed, self.config.model);

        let text = self.complete(&prompt).await?;
        Ok(words_from_text(&text))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
