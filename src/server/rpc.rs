//! JSON-RPC binding of the dispatcher
//!
//! One [`RpcSession`] is created per protocol channel: a single one for
//! the STDIO transport, and a fresh one for every SSE session so that
//! concurrent remote sessions never share dispatch state. The same
//! method set is served everywhere, which keeps the STDIO and SSE code
//! paths from drifting apart.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::errors::Error;
use crate::server::dispatcher::Dispatcher;
use crate::types::CallToolParams;

/// Protocol revision reported by `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Inbound JSON-RPC message, requests and notifications alike
#[derive(Deserialize, Debug)]
struct RpcRequest {
    /// Absent for notifications
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

/// One protocol channel's binding of the dispatcher
pub struct RpcSession {
    dispatcher: Dispatcher,
    initialized: AtomicBool,
}

impl RpcSession {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            initialized: AtomicBool::new(false),
        }
    }

    /// Whether the client has completed `initialize`
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    /// Handle one raw inbound message.
    ///
    /// Returns the response to send back, or `None` for notifications.
    pub async fn handle_raw(&self, raw: &str) -> Option<Value> {
        let request: RpcRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                debug!("Unparseable message: {}", e);
                return Some(error_response(Value::Null, &Error::Json(e)));
            }
        };
        self.handle(request).await
    }

    /// Handle one decoded inbound message
    pub async fn handle_value(&self, message: Value) -> Option<Value> {
        let request: RpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                let err = Error::Protocol(format!("Invalid request: {}", e));
                return Some(error_response(Value::Null, &err));
            }
        };
        self.handle(request).await
    }

    async fn handle(&self, request: RpcRequest) -> Option<Value> {
        // Notifications never get a response
        let Some(id) = request.id else {
            if request.method == "notifications/initialized" {
                debug!("Client confirmed initialization");
            }
            return None;
        };

        let params = request.params.unwrap_or_else(|| Value::Object(Map::new()));

        let response = match request.method.as_str() {
            "initialize" => {
                self.initialized.store(true, Ordering::Relaxed);
                success_response(
                    id,
                    json!({
                        "protocolVersion": PROTOCOL_VERSION,
                        "capabilities": {
                            "tools": {},
                            "resources": {},
                            "prompts": {}
                        },
                        "serverInfo": {
                            "name": self.dispatcher.server_name(),
                            "version": self.dispatcher.server_version()
                        }
                    }),
                )
            }

            "ping" => success_response(id, json!({})),

            "tools/list" => success_response(id, json!({ "tools": self.dispatcher.list_tools() })),

            "tools/call" => {
                let params: CallToolParams = match serde_json::from_value(params) {
                    Ok(params) => params,
                    Err(e) => {
                        let err = Error::InvalidParams(format!("Invalid tool call params: {}", e));
                        return Some(error_response(id, &err));
                    }
                };
                let result = self.dispatcher.call_tool(&params.name, &params.arguments).await;
                match serde_json::to_value(&result) {
                    Ok(value) => success_response(id, value),
                    Err(e) => error_response(
                        id,
                        &Error::Other(format!("Failed to serialize result: {}", e)),
                    ),
                }
            }

            "resources/list" => {
                success_response(id, json!({ "resources": self.dispatcher.list_resources() }))
            }

            "resources/read" => {
                let Some(uri) = params.get("uri").and_then(Value::as_str) else {
                    let err = Error::InvalidParams("Missing required parameter: uri".to_string());
                    return Some(error_response(id, &err));
                };
                let result = self.dispatcher.read_resource(uri).await;
                success_response(id, json!(result))
            }

            "prompts/list" => {
                success_response(id, json!({ "prompts": self.dispatcher.list_prompts() }))
            }

            "prompts/get" => {
                let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
                let arguments = params
                    .get("arguments")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                match self.dispatcher.get_prompt(name, &arguments).await {
                    Ok(result) => success_response(id, json!(result)),
                    Err(e) => error_response(id, &e),
                }
            }

            other => error_response(id, &Error::MethodNotFound(other.to_string())),
        };

        Some(response)
    }
}

fn success_response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn error_response(id: Value, error: &Error) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error.to_error_data()
    })
}
