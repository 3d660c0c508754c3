use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failures of the upstream adapter and the request translator.
///
/// These carry no HTTP status of their own: the same kind maps to different
/// codes depending on which endpoint surfaced it, see [`ApiError`].
#[derive(Debug, Error)]
pub enum LlmError {
    /// No credential is configured, the upstream was never contacted.
    #[error("GROQ_API_KEY not configured")]
    MissingApiKey,

    /// The inbound payload failed validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The outbound request could not be built, e.g. a malformed base URL.
    #[error("Invalid upstream request: {0}")]
    InvalidUpstreamRequest(String),

    /// Network or connection error, including timeouts.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Provider API returned a non-success status.
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// The provider answered, but the body did not have the expected shape.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Whether the upstream could not be reached or refused to serve the call.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ConnectionError(_) | Self::ProviderApiError { .. })
    }
}

/// An error as reported by one of the HTTP handlers.
///
/// This is the single place where error kinds turn into status codes.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// `POST /chat` failed.
    Chat(LlmError),
    /// `GET /models` failed.
    ListModels(LlmError),
    /// The request body could not be extracted.
    Rejected(JsonRejection),
}

impl ApiError {
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::Chat(LlmError::InvalidRequest(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Chat(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ListModels(error) if error.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::ListModels(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected(rejection) => rejection.status(),
        }
    }

    pub(crate) fn detail(&self) -> String {
        match self {
            Self::Chat(error @ LlmError::InvalidRequest(_)) => error.to_string(),
            Self::Chat(error) => format!("AI response failed: {error}"),
            Self::ListModels(error) if error.is_unavailable() => {
                format!("Unable to fetch models from upstream: {error}")
            }
            Self::ListModels(error) => format!("Failed to retrieve models: {error}"),
            Self::Rejected(rejection) => rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection)
    }
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse { detail: self.detail() };

        (status, Json(body)).into_response()
    }
}
