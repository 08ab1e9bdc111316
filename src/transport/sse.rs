//! SSE session transport
//!
//! `GET /sse` opens a push session: the server assigns a session id,
//! streams an `endpoint` event naming the message URL, and then relays
//! queued JSON-RPC responses as `message` events with periodic
//! keep-alives. Each session gets its own [`RpcSession`] so concurrent
//! remote sessions never share dispatch state, and a drop guard removes
//! the session from the map as soon as the client disconnects.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::server::rpc::RpcSession;
use crate::transport::http::AppState;

/// Interval between keep-alive events on an idle session
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// One open push session
#[derive(Clone)]
pub struct SseSession {
    /// Queue of responses awaiting delivery over the event stream
    pub tx: mpsc::Sender<Value>,
    /// This session's own dispatcher binding
    pub rpc: Arc<RpcSession>,
}

/// Map of open sessions, mutated on open and on disconnect
#[derive(Clone, Default)]
pub struct SessionMap {
    inner: Arc<RwLock<HashMap<String, SseSession>>>,
}

impl SessionMap {
    pub fn insert(&self, id: String, session: SseSession) {
        self.inner.write().expect("session map poisoned").insert(id, session);
    }

    pub fn get(&self, id: &str) -> Option<SseSession> {
        self.inner.read().expect("session map poisoned").get(id).cloned()
    }

    pub fn remove(&self, id: &str) {
        self.inner.write().expect("session map poisoned").remove(id);
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("session map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Open a new SSE session
pub async fn handle_sse(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session_id = uuid::Uuid::new_v4().to_string();
    let (tx, mut rx) = mpsc::channel::<Value>(32);

    // Independent registry binding for this session
    let rpc = Arc::new(RpcSession::new(state.dispatcher.clone()));
    state
        .sessions
        .insert(session_id.clone(), SseSession { tx, rpc });

    info!("SSE session opened: {}", session_id);

    // Removed on disconnect even if the session never gets a message;
    // created before the stream so an unpolled stream still cleans up
    let cleanup = scopeguard::guard(
        (state.sessions.clone(), session_id.clone()),
        |(sessions, id)| {
            sessions.remove(&id);
            debug!("SSE session closed: {}", id);
        },
    );

    let stream = async_stream::stream! {
        let _cleanup = cleanup;

        let endpoint = format!("/messages?sessionId={}", session_id);
        yield Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint));

        let mut keep_alive = tokio::time::interval(KEEP_ALIVE_INTERVAL);
        keep_alive.tick().await; // first tick fires immediately

        loop {
            tokio::select! {
                message = rx.recv() => {
                    match message {
                        Some(message) => {
                            let data = serde_json::to_string(&message)
                                .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string());
                            yield Ok(Event::default().event("message").data(data));
                        }
                        None => break,
                    }
                }
                _ = keep_alive.tick() => {
                    yield Ok(Event::default().comment("keepalive"));
                }
            }
        }
    };

    Sse::new(stream)
}

/// Deliver one JSON-RPC message to an open session
pub async fn handle_message(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
    body: String,
) -> Response {
    let Some(session) = params
        .get("sessionId")
        .and_then(|id| state.sessions.get(id))
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Session not found" })),
        )
            .into_response();
    };

    let message: Value = match serde_json::from_str(&body) {
        Ok(message) => message,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON" })),
            )
                .into_response();
        }
    };

    if let Some(response) = session.rpc.handle_value(message).await {
        // The client may have disconnected between lookup and reply
        if session.tx.send(response).await.is_err() {
            warn!("Dropping response for closed SSE session");
        }
    }

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
