//! Remote-call client
//!
//! Lets one server invoke a tool exposed by a peer server's HTTP
//! surface. Endpoints come from the immutable service map, the ambient
//! request context is forwarded as headers, and a failed call is
//! reported upward immediately: fixed timeout, exactly one attempt, no
//! retry. These are synchronous read-mostly lookups, so idempotent
//! replay machinery is not warranted.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::config::ServiceMap;
use crate::context;
use crate::errors::Error;
use crate::types::CallToolResult;

/// Fixed timeout for peer-server calls
const REMOTE_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for invoking tools on peer ACCESS MCP servers
pub struct RemoteToolClient {
    http: reqwest::Client,
    services: ServiceMap,
}

impl RemoteToolClient {
    /// Create a client over the given service endpoint map
    pub fn new(services: ServiceMap) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REMOTE_CALL_TIMEOUT)
            .build()
            .map_err(|e| Error::Service(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, services })
    }

    /// Invoke `tool` on the service registered as `service`.
    ///
    /// The ambient request context's acting-user and request-id are
    /// forwarded when present so the peer observes the same caller
    /// identity.
    pub async fn call(
        &self,
        service: &str,
        tool: &str,
        arguments: &Value,
    ) -> Result<CallToolResult, Error> {
        let endpoint = self.services.get(service).ok_or_else(|| {
            Error::Service(format!(
                "Service '{}' not found; configure it via ACCESS_MCP_SERVICES",
                service
            ))
        })?;

        let url = format!(
            "{}/tools/{}",
            endpoint.as_str().trim_end_matches('/'),
            tool
        );

        debug!("Calling remote tool {}/{} at {}", service, tool, url);

        let mut request = self
            .http
            .post(url)
            .json(&serde_json::json!({ "arguments": arguments }));

        if let Some(ctx) = context::current() {
            if let Some(user) = &ctx.acting_user {
                request = request.header("X-Acting-User", user);
            }
            if let Some(uid) = ctx.acting_user_uid {
                request = request.header("X-Acting-User-Uid", uid.to_string());
            }
            if let Some(id) = &ctx.request_id {
                request = request.header("X-Request-ID", id);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Service(format!("Call to '{}' failed: {}", service, e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            // Surface the peer's error message when it sent one
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                });
            return Err(Error::Service(format!(
                "Service '{}' returned {}: {}",
                service, status, message
            )));
        }

        response
            .json::<CallToolResult>()
            .await
            .map_err(|e| Error::Service(format!("Invalid response from '{}': {}", service, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_service_fails_before_any_io() {
        let client = RemoteToolClient::new(ServiceMap::default()).unwrap();
        let err = client
            .call("affinity-groups", "get_group", &Value::Null)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("affinity-groups"));
        assert!(err.to_string().contains("ACCESS_MCP_SERVICES"));
    }
}
