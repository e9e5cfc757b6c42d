//! HTTP client for the optional generative-assistant collaborator.
//!
//! The assistant is a remote chat-completions endpoint asked to score
//! investors against personas (and to propose new personas) as strict
//! JSON. It is entirely optional: when `ASSISTANT_API_KEY` is unset the
//! application runs with deterministic scoring only, and every failure
//! here collapses into [`AssistantError`] which callers treat as
//! "assistant unavailable".

use std::time::Duration;

use serde::Deserialize;

use fundline_core::types::DbId;

/// HTTP request timeout when `ASSISTANT_TIMEOUT_SECS` is unset.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Chat-completions endpoint when `ASSISTANT_API_URL` is unset.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model name when `ASSISTANT_MODEL` is unset.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Connection settings for the assistant endpoint.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl AssistantConfig {
    /// Load from the environment. Returns `None` when `ASSISTANT_API_KEY`
    /// is unset, which means the feature is switched off.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("ASSISTANT_API_KEY").ok()?;
        let api_url =
            std::env::var("ASSISTANT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = std::env::var("ASSISTANT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = std::env::var("ASSISTANT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self {
            api_url,
            api_key,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the assistant layer. Callers log these at warn and fall
/// back to deterministic scoring; they are never surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("assistant returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response carried no message content.
    #[error("assistant response had no content")]
    MissingContent,

    /// The message content was not the JSON we asked for.
    #[error("failed to parse assistant output: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One scored persona from the assistant's match response.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMatch {
    pub persona_id: DbId,
    pub score: u8,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub matched_attributes: Vec<String>,
    #[serde(default)]
    pub gap_attributes: Vec<String>,
}

/// One proposed persona from the assistant's suggestion response.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSuggestion {
    pub suggested_name: String,
    pub description: String,
    #[serde(default)]
    pub target_investor_type: Option<String>,
    #[serde(default)]
    pub target_nationalities: Vec<String>,
    #[serde(default)]
    pub target_sectors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the assistant endpoint. One request per call, no retries.
pub struct AssistantClient {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl AssistantClient {
    /// Create a client with a pre-configured HTTP timeout.
    pub fn new(config: AssistantConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Score one investor against a batch of personas in a single call.
    ///
    /// `investor` and `personas` are pre-serialized summaries; the
    /// assistant is asked for a JSON array of objects shaped like
    /// [`AssistantMatch`].
    pub async fn score_personas(
        &self,
        investor: &serde_json::Value,
        personas: &serde_json::Value,
    ) -> Result<Vec<AssistantMatch>, AssistantError> {
        let prompt = format!(
            "You are scoring how well an investor fits each target persona of a fund.\n\
             Investor:\n{investor}\n\nPersonas:\n{personas}\n\n\
             For every persona return an object with: persona_id (number), \
             score (integer 0-100), reasoning (short string), \
             matched_attributes (array of attribute names), \
             gap_attributes (array of attribute names).\n\
             Respond with ONLY a JSON array, no prose."
        );
        let content = self.complete(&prompt).await?;
        Ok(serde_json::from_str(strip_code_fences(&content))?)
    }

    /// Ask for new persona proposals covering poorly matched investors.
    pub async fn suggest_personas(
        &self,
        unmatched: &serde_json::Value,
    ) -> Result<Vec<AssistantSuggestion>, AssistantError> {
        let prompt = format!(
            "These investors in a fund's pipeline match none of its target \
             personas well:\n{unmatched}\n\n\
             Propose up to 3 new personas that would cover them. For each \
             return an object with: suggested_name (string), description \
             (string), target_investor_type (string or null), \
             target_nationalities (array of strings), target_sectors \
             (array of strings).\n\
             Respond with ONLY a JSON array, no prose."
        );
        let content = self.complete(&prompt).await?;
        Ok(serde_json::from_str(strip_code_fences(&content))?)
    }

    /// Execute one chat-completions request and extract the message text.
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": 0,
        });

        tracing::debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "Sending assistant request"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AssistantError::MissingContent)
    }
}

/// Models often wrap JSON answers in Markdown code fences despite being
/// told not to. Strip a leading ```/```json fence and its closing fence.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
