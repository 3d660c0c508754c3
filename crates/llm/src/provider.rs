pub(crate) mod groq;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::{messages::ModelInfo, request::CompletionRequest};

/// Text and token accounting of one finished completion.
#[derive(Debug, Clone)]
pub(crate) struct Completion {
    pub(crate) content: String,
    pub(crate) total_tokens: u32,
}

/// Model descriptors as listed by the provider, in provider order.
#[derive(Debug, Clone)]
pub(crate) struct ModelList {
    pub(crate) object: Option<String>,
    pub(crate) data: Vec<ModelInfo>,
}

/// Trait for the upstream inference provider.
///
/// Every call is a single outbound request: no retries and no caching. A
/// missing credential must be reported as `LlmError::MissingApiKey` without
/// touching the network.
///
/// Note for async_trait: We need this trait to be dyn-compatible, so we can't just use the
/// Rust async trait functions without Box/Pin.
#[async_trait]
pub(crate) trait Provider: Send + Sync {
    /// Process a non-streaming chat completion request.
    async fn chat_completion(&self, request: CompletionRequest) -> crate::Result<Completion>;

    /// List the models the provider offers.
    async fn list_models(&self) -> crate::Result<ModelList>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
