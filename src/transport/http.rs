//! HTTP Transport
//!
//! The machine-to-machine surface of a server: liveness, tool listing,
//! and synchronous tool invocation, plus the SSE session endpoints
//! mounted from [`crate::transport::sse`]. Listing shares the dispatcher
//! fail-soft contract, so `GET /tools` always answers 200.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::Method;
use serde_json::{json, Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::context::{self, RequestContext};
use crate::errors::Error;
use crate::server::dispatcher::Dispatcher;
use crate::transport::sse::{self, SessionMap};

/// Shared state behind the HTTP surface
pub struct AppState {
    /// Dispatcher bound to the concrete server
    pub dispatcher: Dispatcher,
    /// Whether tool invocations must present a valid `X-Api-Key`
    pub require_api_key: bool,
    /// Expected API key value (from `MCP_API_KEY`)
    pub inbound_api_key: Option<String>,
    /// Open SSE sessions
    pub sessions: SessionMap,
}

impl AppState {
    pub fn new(
        dispatcher: Dispatcher,
        require_api_key: bool,
        inbound_api_key: Option<String>,
    ) -> Self {
        Self {
            dispatcher,
            require_api_key,
            inbound_api_key,
            sessions: SessionMap::default(),
        }
    }
}

/// Build the full HTTP router for a server
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/{tool_name}", post(call_tool))
        .route("/sse", get(sse::handle_sse))
        .route("/messages", post(sse::handle_message))
        .layer(cors)
        .with_state(state)
}

/// Serve the router on an already bound listener
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: Arc<AppState>,
) -> Result<(), Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(
            "{} HTTP server running on {}",
            state.dispatcher.server_name(),
            addr
        );
    }
    axum::serve(listener, router(state))
        .await
        .map_err(|e| Error::Transport(format!("HTTP server error: {}", e)))
}

fn error_body(error: &Error) -> Json<Value> {
    Json(json!({ "error": error.to_string() }))
}

/// Build the per-request ambient context from inbound headers
pub fn context_from_headers(headers: &HeaderMap) -> RequestContext {
    let header_str =
        |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);

    RequestContext {
        acting_user: header_str("x-acting-user"),
        acting_user_uid: header_str("x-acting-user-uid").and_then(|raw| raw.parse().ok()),
        request_id: header_str("x-request-id"),
    }
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "server": state.dispatcher.server_name(),
        "version": state.dispatcher.server_version(),
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_tools(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "tools": state.dispatcher.list_tools() }))
}

async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(tool_name): Path<String>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    // Misconfiguration wins over any supplied credentials
    if state.require_api_key {
        let Some(expected) = &state.inbound_api_key else {
            let err = Error::Config("Server misconfigured: MCP_API_KEY is not set".to_string());
            return (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err));
        };
        let supplied = headers.get("x-api-key").and_then(|v| v.to_str().ok());
        if supplied != Some(expected.as_str()) {
            // Deliberately generic, no hint about what was wrong
            let err = Error::Authorization("Unauthorized".to_string());
            return (StatusCode::UNAUTHORIZED, error_body(&err));
        }
    }

    if !state.dispatcher.has_tool(&tool_name) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Tool '{}' not found", tool_name) })),
        );
    }

    let arguments: Map<String, Value> = if body.trim().is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => value
                .get("arguments")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            Err(e) => {
                // Matches the catch-all failure contract of this
                // endpoint: anything that is not 404/401 answers 500
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": format!("Invalid JSON body: {}", e) })),
                );
            }
        }
    };

    let ctx = context_from_headers(&headers);
    debug!(
        "Invoking tool '{}' (acting_user={:?})",
        tool_name, ctx.acting_user
    );

    let dispatcher = state.dispatcher.clone();
    let result = context::scope(ctx, async move {
        dispatcher.call_tool(&tool_name, &arguments).await
    })
    .await;

    match serde_json::to_value(&result) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to serialize result: {}", e) })),
        ),
    }
}
