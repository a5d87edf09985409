//! Axum HTTP server for the chat endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::handler::{ChatError, ChatService};

/// Shared server state: the one chat service, built at startup.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

/// `POST /chat` request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: String,
}

/// `POST /chat` response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Error body for 4xx/5xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn run_server(host: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| "invalid host/port for qalam server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("qalam listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "qalam"}))
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.chat.answer(&request.question).await {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(e @ (ChatError::EmptyQuestion | ChatError::UnsupportedLanguage(_))) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: e.to_string() }),
        )),
        Err(ChatError::Internal(detail)) => {
            // Full detail stays in the log; the client gets an opaque message.
            error!(detail = %detail, "chat request failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: "An internal server error occurred.".to_string() }),
            ))
        }
    }
}
