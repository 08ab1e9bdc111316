//! System Status MCP server
//!
//! Minimal concrete server on top of the dispatch core: wraps the
//! ACCESS-CI operations API's outage feeds as tools and exposes the
//! current outage list as a resource.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use access_mcp::errors::Error;
use access_mcp::outbound::OutboundClient;
use access_mcp::types::{CallToolResult, ReadResourceResult, Resource, Tool};
use access_mcp::{Server, ServerConfig, ToolProvider};

const OPERATIONS_API: &str = "https://operations-api.access-ci.org/wh2/news/v1";

struct SystemStatusServer {
    outbound: OutboundClient,
}

impl SystemStatusServer {
    fn new(config: &ServerConfig) -> Self {
        Self {
            outbound: OutboundClient::new(config.upstream_api_key.clone()),
        }
    }

    async fn fetch_feed(&self, feed: &str) -> Result<Value, Error> {
        let url = format!("{}/affiliation/access-ci.org/{}/", OPERATIONS_API, feed);
        let response = self
            .outbound
            .get()
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Operations API unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "Operations API returned {} for {}",
                status, feed
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Upstream(format!("Invalid Operations API response: {}", e)))
    }
}

#[async_trait]
impl ToolProvider for SystemStatusServer {
    fn name(&self) -> &str {
        "access-mcp-system-status"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn tools(&self) -> Result<Vec<Tool>, Error> {
        Ok(vec![
            Tool::without_args(
                "get_current_outages",
                "Get current outages across ACCESS-CI resources",
            ),
            Tool::without_args(
                "get_scheduled_maintenance",
                "Get scheduled maintenance windows across ACCESS-CI resources",
            ),
        ])
    }

    fn resources(&self) -> Result<Vec<Resource>, Error> {
        Ok(vec![Resource::new(
            "accessci://system-status",
            "ACCESS-CI system status",
            Some("Current outages as reported by the operations API".to_string()),
            "application/json",
        )])
    }

    async fn call_tool(
        &self,
        name: &str,
        _arguments: &Map<String, Value>,
    ) -> Result<CallToolResult, Error> {
        let feed = match name {
            "get_current_outages" => "current_outages",
            "get_scheduled_maintenance" => "future_outages",
            other => return Err(Error::Tool(format!("Unhandled tool: {}", other))),
        };
        let body = self.fetch_feed(feed).await?;
        Ok(CallToolResult::json(&body))
    }

    async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, Error> {
        match uri {
            "accessci://system-status" => {
                let body = self.fetch_feed("current_outages").await?;
                Ok(ReadResourceResult::text(
                    uri,
                    "application/json",
                    serde_json::to_string_pretty(&body)?,
                ))
            }
            other => Err(Error::Resource(format!("Unknown resource: {}", other))),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    let provider = Arc::new(SystemStatusServer::new(&config));

    let server = Server::builder()
        .provider(provider)
        .config(config)
        .build()?;

    server.run().await?;
    Ok(())
}
