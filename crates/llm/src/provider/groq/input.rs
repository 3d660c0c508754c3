use serde::Serialize;

use crate::request::CompletionRequest;

/// Request body for the OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Serialize)]
pub(super) struct GroqRequest {
    /// ID of the model to use.
    pub(super) model: String,

    /// The conversation, a single user turn here.
    pub(super) messages: Vec<GroqMessage>,

    /// The maximum number of tokens that can be generated in the chat completion.
    pub(super) max_tokens: u32,

    /// What sampling temperature to use, between 0 and 2.
    pub(super) temperature: f32,

    /// Always false, partial deltas are not relayed.
    pub(super) stream: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct GroqMessage {
    pub(super) role: &'static str,
    pub(super) content: String,
}

impl From<CompletionRequest> for GroqRequest {
    fn from(request: CompletionRequest) -> Self {
        Self {
            model: request.model,
            messages: vec![GroqMessage {
                role: "user",
                content: request.message,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }
}
