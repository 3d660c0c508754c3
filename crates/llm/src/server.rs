use std::{borrow::Cow, sync::Arc, time::Instant};

use config::LlmConfig;

use crate::{
    messages::{ChatRequest, ChatResponse, ModelsResponse},
    provider::{Provider, groq::GroqProvider},
    request::{ChatDefaults, CompletionRequest},
};

const MESSAGE_PREVIEW_CHARS: usize = 100;
const RESPONSE_PREVIEW_CHARS: usize = 200;

/// Ties the request translator, the provider and the response shaper together.
pub(crate) struct LlmServer {
    provider: Arc<dyn Provider>,
    model: String,
    defaults: ChatDefaults,
}

impl LlmServer {
    pub fn new(config: &LlmConfig) -> crate::Result<Self> {
        let provider = GroqProvider::new(config)?;

        Ok(Self::with_provider(Arc::new(provider), config))
    }

    pub(crate) fn with_provider(provider: Arc<dyn Provider>, config: &LlmConfig) -> Self {
        log::debug!(
            "LLM server initialized with provider '{}' and model '{}'",
            provider.name(),
            config.model
        );

        Self {
            provider,
            model: config.model.clone(),
            defaults: ChatDefaults::from(config),
        }
    }

    /// Process a chat request.
    pub async fn chat(&self, request: ChatRequest) -> crate::Result<ChatResponse> {
        log::info!("• Message: {}", preview(&request.message, MESSAGE_PREVIEW_CHARS));

        let request = CompletionRequest::new(request, &self.model, self.defaults)?;

        log::info!(
            "• Config - Model: {}, Tokens: {}, Temp: {}",
            request.model,
            request.max_tokens,
            request.temperature
        );

        let started = Instant::now();
        let completion = self.provider.chat_completion(request).await?;
        let elapsed = started.elapsed();

        log::info!("✓ Response time: {:.3}s", elapsed.as_secs_f64());
        log::info!("✓ Tokens used: {}", completion.total_tokens);
        log::info!(
            "✓ AI response: {}",
            preview(&completion.content, RESPONSE_PREVIEW_CHARS)
        );

        Ok(ChatResponse::new(completion, &self.model, elapsed))
    }

    /// List the models the provider offers.
    pub async fn list_models(&self) -> crate::Result<ModelsResponse> {
        let started = Instant::now();
        let list = self.provider.list_models().await?;
        let response = ModelsResponse::new(list, &self.model);

        log::info!("✓ Models response time: {:.3}s", started.elapsed().as_secs_f64());
        log::info!("✓ Models found: {} models", response.total_models);
        log::info!("• Current model: {}", response.current_model);

        Ok(response)
    }
}

/// Cuts `text` to `max_chars` characters, marking the cut with an ellipsis.
fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
        None => Cow::Borrowed(text),
    }
}
