//! HTTP surface: explicit router construction and error→status translation.
//!
//! Handlers contain no downloader logic; they bind request bodies to the
//! `VideoDataProvider` capability and serialize the result. Failures come
//! back as `yttools_core::Error` and are mapped to HTTP in exactly one place.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use yttools_core::{Error, VideoDataProvider, VideoMetadata};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
struct AppState {
    provider: Arc<dyn VideoDataProvider>,
}

#[derive(Debug, Deserialize)]
pub struct VideoRequest {
    pub url: String,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

/// Error boundary: `CaptionsNotFound` is the caller's 404; everything else
/// collapses to 500 with the human-readable message in a `detail` field.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::CaptionsNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "detail": self.0.to_string() }));
        (status, body).into_response()
    }
}

pub fn router(provider: Arc<dyn VideoDataProvider>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/video-data", post(video_data))
        .route("/video-captions", post(video_captions))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { provider })
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "YouTube Tools API is running" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn video_data(
    State(state): State<AppState>,
    Json(req): Json<VideoRequest>,
) -> Result<Json<VideoMetadata>, ApiError> {
    // `languages` is accepted for body parity with the captions endpoint but
    // has no effect on metadata retrieval.
    let meta = state.provider.video_data(&req.url).await?;
    Ok(Json(meta))
}

async fn video_captions(
    State(state): State<AppState>,
    Json(req): Json<VideoRequest>,
) -> Result<Json<String>, ApiError> {
    let langs = req.languages.unwrap_or_default();
    let text = state.provider.video_captions(&req.url, &langs).await?;
    Ok(Json(text))
}

/// Bind `config.host:config.port` and serve until the process is stopped.
pub async fn serve(config: ServerConfig, provider: Arc<dyn VideoDataProvider>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router(provider)).await?;
    Ok(())
}
