//! Upstream LLM provider configuration.

use std::time::Duration;

use duration_str::deserialize_duration;
use secrecy::SecretString;
use serde::Deserialize;

/// Base URL of the Groq OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

/// Completion token limit applied when a chat request omits `max_tokens`.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Sampling temperature applied when a chat request omits `temperature`.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Settings for the single upstream inference provider.
///
/// Read once at startup and shared read-only by every request handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LlmConfig {
    /// Bearer credential for the provider. The service starts without one,
    /// but `/chat` and `/models` fail until it is set.
    pub api_key: Option<SecretString>,

    /// Base URL of the OpenAI-compatible provider API.
    pub base_url: String,

    /// Model identifier sent upstream and echoed in responses.
    pub model: String,

    /// Default completion token limit.
    pub max_tokens: u32,

    /// Default sampling temperature.
    pub temperature: f32,

    /// Timeout for a chat completion call.
    #[serde(deserialize_with = "deserialize_duration")]
    pub chat_timeout: Duration,

    /// Timeout for the model listing call.
    #[serde(deserialize_with = "deserialize_duration")]
    pub models_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            chat_timeout: Duration::from_secs(60),
            models_timeout: Duration::from_secs(10),
        }
    }
}

impl LlmConfig {
    /// Whether a non-empty credential is configured.
    pub fn has_api_key(&self) -> bool {
        use secrecy::ExposeSecret;

        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}
