//! A stand-in for the Groq OpenAI-compatible API.

use std::net::SocketAddr;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Builder for the upstream test server
pub struct GroqMock {
    models: Vec<Value>,
    reply: String,
    total_tokens: u32,
    failure: Option<Failure>,
    delay: Option<Duration>,
}

#[derive(Clone)]
enum Failure {
    Status(StatusCode, String),
    Malformed,
}

impl Default for GroqMock {
    fn default() -> Self {
        Self::new()
    }
}

impl GroqMock {
    pub fn new() -> Self {
        Self {
            models: vec![
                model("llama-3.1-8b-instant", "Meta"),
                model("openai/gpt-oss-120b", "OpenAI"),
            ],
            reply: "Hello from upstream".to_string(),
            total_tokens: 42,
            failure: None,
            delay: None,
        }
    }

    /// Replace the advertised model list with raw descriptors.
    pub fn with_models(mut self, models: Vec<Value>) -> Self {
        self.models = models;
        self
    }

    pub fn with_reply(mut self, reply: impl Into<String>, total_tokens: u32) -> Self {
        self.reply = reply.into();
        self.total_tokens = total_tokens;
        self
    }

    /// Every call fails with the given status and plain text body.
    pub fn with_status_error(mut self, status: u16, message: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.failure = Some(Failure::Status(status, message.into()));
        self
    }

    /// Every call answers 200 with a body that is not JSON.
    pub fn with_malformed_body(mut self) -> Self {
        self.failure = Some(Failure::Malformed);
        self
    }

    /// Every call waits this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn spawn(self) -> TestUpstream {
        let state = Arc::new(MockState {
            models: self.models,
            reply: self.reply,
            total_tokens: self.total_tokens,
            failure: self.failure,
            delay: self.delay,
            requests: AtomicUsize::new(0),
            last_chat: Mutex::new(None),
            last_authorization: Mutex::new(None),
        });

        let app = Router::new()
            .route("/openai/v1/chat/completions", post(chat_completions))
            .route("/openai/v1/models", get(list_models))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestUpstream { address, state }
    }
}

/// A model descriptor the way the provider sends it.
pub fn model(id: &str, owned_by: &str) -> Value {
    json!({
        "id": id,
        "object": "model",
        "created": 1_700_000_000,
        "owned_by": owned_by,
        "active": true,
        "context_window": 131_072,
        "max_completion_tokens": 32_768,
        "public_apps": null
    })
}

/// A running upstream mock.
pub struct TestUpstream {
    pub address: SocketAddr,
    state: Arc<MockState>,
}

impl TestUpstream {
    /// Value for `llm.base_url`.
    pub fn base_url(&self) -> String {
        format!("http://{}/openai/v1", self.address)
    }

    /// Requests received on any route.
    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// Body of the latest chat completion call.
    pub fn last_chat(&self) -> Option<Value> {
        self.state.last_chat.lock().unwrap().clone()
    }

    /// `Authorization` header of the latest call.
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }

    /// A server configuration pointing at this upstream.
    pub fn config(&self, model: &str) -> String {
        indoc::formatdoc! {r#"
            [llm]
            api_key = "test-key"
            base_url = "{}"
            model = "{model}"
        "#, self.base_url()}
    }
}

struct MockState {
    models: Vec<Value>,
    reply: String,
    total_tokens: u32,
    failure: Option<Failure>,
    delay: Option<Duration>,
    requests: AtomicUsize,
    last_chat: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
}

impl MockState {
    async fn stall(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn record(&self, headers: &HeaderMap) -> Option<Response> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let authorization = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        *self.last_authorization.lock().unwrap() = authorization;

        match self.failure.clone()? {
            Failure::Status(status, message) => Some((status, message).into_response()),
            Failure::Malformed => Some((StatusCode::OK, "<html>not json</html>").into_response()),
        }
    }
}

async fn chat_completions(State(state): State<Arc<MockState>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Some(failure) = state.record(&headers) {
        return failure;
    }

    state.stall().await;

    let model = body["model"].clone();
    *state.last_chat.lock().unwrap() = Some(body);

    Json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": state.reply },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": state.total_tokens.saturating_sub(10),
            "total_tokens": state.total_tokens
        }
    }))
    .into_response()
}

async fn list_models(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Some(failure) = state.record(&headers) {
        return failure;
    }

    state.stall().await;

    Json(json!({ "object": "list", "data": state.models })).into_response()
}
