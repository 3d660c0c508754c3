use config::LlmConfig;

use crate::{error::LlmError, messages::ChatRequest};

const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Values applied when a chat request leaves them out.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChatDefaults {
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f32,
}

impl From<&LlmConfig> for ChatDefaults {
    fn from(config: &LlmConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// A validated chat request with every default filled in, ready for the provider.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompletionRequest {
    pub(crate) model: String,
    pub(crate) message: String,
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f32,
}

impl CompletionRequest {
    pub(crate) fn new(request: ChatRequest, model: &str, defaults: ChatDefaults) -> crate::Result<Self> {
        if request.message.trim().is_empty() {
            return Err(LlmError::InvalidRequest("message must not be empty".to_string()));
        }

        if request.max_tokens == Some(0) {
            return Err(LlmError::InvalidRequest("max_tokens must be at least 1".to_string()));
        }

        if let Some(temperature) = request.temperature.filter(|t| !TEMPERATURE_RANGE.contains(t)) {
            return Err(LlmError::InvalidRequest(format!(
                "temperature must be between 0.0 and 2.0, got {temperature}"
            )));
        }

        Ok(Self {
            model: model.to_string(),
            message: request.message,
            max_tokens: request.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: request.temperature.unwrap_or(defaults.temperature),
        })
    }
}
