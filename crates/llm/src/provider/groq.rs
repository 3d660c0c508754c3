mod input;
mod output;

use std::time::Duration;

use async_trait::async_trait;
use config::LlmConfig;
use reqwest::{Client, Response, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use self::{
    input::GroqRequest,
    output::{GroqModelsResponse, GroqResponse},
};

use crate::{
    error::LlmError,
    provider::{Completion, ModelList, Provider},
    request::CompletionRequest,
};

/// Client for an OpenAI-compatible inference API, Groq by default.
///
/// Built once at startup; the underlying connection pool is shared by all
/// concurrent handlers.
pub(crate) struct GroqProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    chat_timeout: Duration,
    models_timeout: Duration,
}

impl GroqProvider {
    pub fn new(config: &LlmConfig) -> crate::Result<Self> {
        let client = Client::builder().build().map_err(|e| {
            log::error!("Failed to create HTTP client for the upstream provider: {e}");
            LlmError::ConnectionError(format!("Failed to create HTTP client: {e}"))
        })?;

        let api_key = config.has_api_key().then(|| config.api_key.clone()).flatten();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            chat_timeout: config.chat_timeout,
            models_timeout: config.models_timeout,
        })
    }

    fn api_key(&self) -> crate::Result<&SecretString> {
        self.api_key.as_ref().ok_or(LlmError::MissingApiKey)
    }
}

#[async_trait]
impl Provider for GroqProvider {
    async fn chat_completion(&self, request: CompletionRequest) -> crate::Result<Completion> {
        let key = self.api_key()?;
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", key.expose_secret()))
            .timeout(self.chat_timeout)
            .json(&GroqRequest::from(request))
            .send()
            .await
            .map_err(send_error)?;

        let response_text = read_success_body(response).await?;

        let response: GroqResponse = sonic_rs::from_str(&response_text).map_err(|e| {
            log::error!("Failed to parse chat completion response: {e}");
            log::debug!("Raw response that failed to parse: {response_text}");
            LlmError::MalformedResponse(e.to_string())
        })?;

        Completion::try_from(response)
    }

    async fn list_models(&self) -> crate::Result<ModelList> {
        let key = self.api_key()?;
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", key.expose_secret()))
            .timeout(self.models_timeout)
            .send()
            .await
            .map_err(send_error)?;

        let response_text = read_success_body(response).await?;

        let models: GroqModelsResponse = sonic_rs::from_str(&response_text).map_err(|e| {
            log::error!("Failed to parse models list response: {e}");
            log::debug!("Raw response that failed to parse: {response_text}");
            LlmError::MalformedResponse(e.to_string())
        })?;

        Ok(models.into())
    }

    fn name(&self) -> &str {
        "groq"
    }
}

/// A request that never left the process is a local mistake, not an outage.
fn send_error(e: reqwest::Error) -> LlmError {
    if e.is_builder() {
        log::error!("Failed to build upstream request: {e}");
        LlmError::InvalidUpstreamRequest(e.to_string())
    } else {
        LlmError::ConnectionError(format!("Failed to send request: {e}"))
    }
}

/// Returns the body of a 2xx response, or the provider's error text otherwise.
async fn read_success_body(response: Response) -> crate::Result<String> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        log::error!("Upstream API error ({status}): {error_text}");

        return Err(LlmError::ProviderApiError {
            status: status.as_u16(),
            message: error_text,
        });
    }

    response
        .text()
        .await
        .map_err(|e| LlmError::ConnectionError(format!("Failed to read upstream response body: {e}")))
}
