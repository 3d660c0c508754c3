use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    error::LlmError,
    messages::ModelInfo,
    provider::{Completion, ModelList, Provider},
    request::CompletionRequest,
};

type Outcome<T> = Box<dyn Fn() -> crate::Result<T> + Send + Sync>;

/// In-process provider that records what it was asked and answers from closures.
pub(crate) struct MockProvider {
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
    chat: Outcome<Completion>,
    models: Outcome<ModelList>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            chat: Box::new(|| {
                Ok(Completion {
                    content: "Hello from the mock".to_string(),
                    total_tokens: 25,
                })
            }),
            models: Box::new(|| {
                Ok(ModelList {
                    object: Some("list".to_string()),
                    data: vec![ModelInfo {
                        id: "m1".to_string(),
                        owned_by: Some("org".to_string()),
                        active: Some(true),
                        context_window: Some(8192),
                        max_completion_tokens: Some(1024),
                    }],
                })
            }),
        }
    }

    pub(crate) fn with_chat_error(mut self, error: fn() -> LlmError) -> Self {
        self.chat = Box::new(move || Err(error()));
        self
    }

    pub(crate) fn with_models_error(mut self, error: fn() -> LlmError) -> Self {
        self.models = Box::new(move || Err(error()));
        self
    }

    /// Number of provider calls, chat and model listing combined.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn chat_completion(&self, request: CompletionRequest) -> crate::Result<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        (self.chat)()
    }

    async fn list_models(&self) -> crate::Result<ModelList> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        (self.models)()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
