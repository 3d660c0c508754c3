use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::provider::{Completion, ModelList};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatRequest {
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) max_tokens: Option<u32>,
    #[serde(default)]
    pub(crate) temperature: Option<f32>,
}

/// Successful `POST /chat` reply.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatResponse {
    pub(crate) response: String,
    pub(crate) model: String,
    pub(crate) tokens_used: u32,
    /// Seconds spent in the upstream call.
    pub(crate) response_time: f64,
    pub(crate) timestamp: Timestamp,
}

impl ChatResponse {
    /// Wraps an upstream completion. `elapsed` covers only the outbound call.
    pub(crate) fn new(completion: Completion, model: &str, elapsed: Duration) -> Self {
        Self {
            response: completion.content,
            model: model.to_string(),
            tokens_used: completion.total_tokens,
            response_time: elapsed.as_secs_f64(),
            timestamp: Timestamp::now(),
        }
    }
}

/// One model as advertised by the upstream provider.
///
/// Only `id` is guaranteed; the rest is passed through as the provider sent it,
/// and serialized as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Model identifier, usable as `GROQ_MODEL`.
    pub id: String,
    /// Organization that publishes the model.
    pub owned_by: Option<String>,
    /// Whether the provider currently serves the model.
    pub active: Option<bool>,
    /// Maximum prompt plus completion length in tokens.
    pub context_window: Option<u64>,
    /// Maximum number of generated tokens.
    pub max_completion_tokens: Option<u64>,
}

/// Successful `GET /models` reply.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ModelsResponse {
    pub(crate) object: Option<String>,
    pub(crate) data: Vec<ModelInfo>,
    pub(crate) current_model: String,
    pub(crate) total_models: usize,
}

impl ModelsResponse {
    pub(crate) fn new(list: ModelList, current_model: &str) -> Self {
        let total_models = list.data.len();

        Self {
            object: list.object,
            data: list.data,
            current_model: current_model.to_string(),
            total_models,
        }
    }
}
