use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{ConnectInfo, Json, State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use config::LlmConfig;

mod error;
mod messages;
mod provider;
mod request;
mod server;

use error::ApiError;
use messages::ChatRequest;
use provider::{Provider, groq::GroqProvider};
use server::LlmServer;

pub use error::LlmError;
pub use messages::ModelInfo;

pub(crate) type Result<T> = std::result::Result<T, LlmError>;

/// Creates an axum router for the `/chat` and `/models` endpoints.
///
/// Handlers read the client address from `ConnectInfo<SocketAddr>`, so the
/// router must be served with `into_make_service_with_connect_info`.
pub fn router(config: &LlmConfig) -> anyhow::Result<Router> {
    let server = LlmServer::new(config).map_err(|e| anyhow::anyhow!("Failed to initialize LLM server: {e}"))?;

    Ok(routes(Arc::new(server)))
}

/// Lists the upstream models with the given settings, outside of any server.
pub async fn fetch_models(config: &LlmConfig) -> Result<Vec<ModelInfo>> {
    let provider = GroqProvider::new(config)?;
    let list = provider.list_models().await?;

    Ok(list.data)
}

fn routes(server: Arc<LlmServer>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/models", get(list_models))
        .with_state(server)
}

/// Handle chat requests.
async fn chat(
    State(server): State<Arc<LlmServer>>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let client_ip = client.ip();
    log::info!("• CHAT REQUEST - Client: {client_ip}");

    let Json(request) = payload.inspect_err(|rejection| {
        log::warn!("✗ CHAT REJECTED - Client: {client_ip}, Error: {}", rejection.body_text());
    })?;

    match server.chat(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            log::error!("✗ CHAT ERROR - Client: {client_ip}, Error: {e}");
            Err(ApiError::Chat(e))
        }
    }
}

/// Handle list models requests.
async fn list_models(
    State(server): State<Arc<LlmServer>>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let client_ip = client.ip();
    log::info!("• MODELS REQUEST - Client: {client_ip}");

    match server.list_models().await {
        Ok(response) => Ok(Json(response)),
        Err(e) if e.is_unavailable() => {
            log::error!("✗ MODELS API ERROR - Client: {client_ip}, Error: {e}");
            Err(ApiError::ListModels(e))
        }
        Err(e) => {
            log::error!("✗ MODELS ERROR - Client: {client_ip}, Error: {e}");
            Err(ApiError::ListModels(e))
        }
    }
}
