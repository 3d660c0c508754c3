use serde::Deserialize;

use crate::{
    error::LlmError,
    messages::ModelInfo,
    provider::{Completion, ModelList},
};

/// Response from the `/chat/completions` endpoint, reduced to what we read.
#[derive(Debug, Deserialize)]
pub(super) struct GroqResponse {
    pub(super) choices: Vec<GroqChoice>,
    pub(super) usage: GroqUsage,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqChoice {
    pub(super) message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqResponseMessage {
    /// Null when the model answered with tool calls only.
    #[serde(default)]
    pub(super) content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqUsage {
    pub(super) total_tokens: u32,
}

impl TryFrom<GroqResponse> for Completion {
    type Error = LlmError;

    fn try_from(response: GroqResponse) -> Result<Self, Self::Error> {
        let Some(choice) = response.choices.into_iter().next() else {
            return Err(LlmError::MalformedResponse("response contains no choices".to_string()));
        };

        let Some(content) = choice.message.content else {
            return Err(LlmError::MalformedResponse("first choice has no message content".to_string()));
        };

        Ok(Completion {
            content,
            total_tokens: response.usage.total_tokens,
        })
    }
}

/// Response from the `/models` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct GroqModelsResponse {
    #[serde(default)]
    pub(super) object: Option<String>,
    #[serde(default)]
    pub(super) data: Vec<GroqModel>,
}

/// A model descriptor. Fields we do not re-expose (`created`, `public_apps`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct GroqModel {
    pub(super) id: String,
    #[serde(default)]
    pub(super) owned_by: Option<String>,
    #[serde(default)]
    pub(super) active: Option<bool>,
    #[serde(default)]
    pub(super) context_window: Option<u64>,
    #[serde(default)]
    pub(super) max_completion_tokens: Option<u64>,
}

impl From<GroqModel> for ModelInfo {
    fn from(model: GroqModel) -> Self {
        Self {
            id: model.id,
            owned_by: model.owned_by,
            active: model.active,
            context_window: model.context_window,
            max_completion_tokens: model.max_completion_tokens,
        }
    }
}

impl From<GroqModelsResponse> for ModelList {
    fn from(response: GroqModelsResponse) -> Self {
        Self {
            object: response.object,
            data: response.data.into_iter().map(Into::into).collect(),
        }
    }
}
