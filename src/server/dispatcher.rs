//! Failure boundary between providers and transports
//!
//! Every transport goes through [`Dispatcher`], which converts provider
//! errors into structured results instead of letting them escape to the
//! wire. The policy is deliberately asymmetric: listings degrade to
//! empty, tool calls and resource reads yield typed error payloads, and
//! prompt retrieval is the one operation allowed to fail loudly since it
//! has no safe default payload shape.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::errors::Error;
use crate::server::provider::ToolProvider;
use crate::types::{CallToolResult, GetPromptResult, Prompt, ReadResourceResult, Resource, Tool};

/// Binds a [`ToolProvider`] into the uniform dispatch contract
#[derive(Clone)]
pub struct Dispatcher {
    provider: Arc<dyn ToolProvider>,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn ToolProvider>) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &Arc<dyn ToolProvider> {
        &self.provider
    }

    /// Server name of the wrapped provider
    pub fn server_name(&self) -> &str {
        self.provider.name()
    }

    /// Server version of the wrapped provider
    pub fn server_version(&self) -> &str {
        self.provider.version()
    }

    /// List tools; never fails
    pub fn list_tools(&self) -> Vec<Tool> {
        match self.provider.tools() {
            Ok(tools) => tools,
            Err(e) => {
                warn!("Tool listing failed, returning empty list: {}", e);
                Vec::new()
            }
        }
    }

    /// List resources; never fails
    pub fn list_resources(&self) -> Vec<Resource> {
        match self.provider.resources() {
            Ok(resources) => resources,
            Err(e) => {
                warn!("Resource listing failed, returning empty list: {}", e);
                Vec::new()
            }
        }
    }

    /// List prompts; never fails
    pub fn list_prompts(&self) -> Vec<Prompt> {
        match self.provider.prompts() {
            Ok(prompts) => prompts,
            Err(e) => {
                warn!("Prompt listing failed, returning empty list: {}", e);
                Vec::new()
            }
        }
    }

    /// True when `name` is in the current tool list
    pub fn has_tool(&self, name: &str) -> bool {
        self.list_tools().iter().any(|tool| tool.name == name)
    }

    /// Invoke a tool, converting every failure into an error result.
    ///
    /// Unknown names and provider errors both come back as
    /// `isError=true` results with a JSON `{"error": ...}` text payload;
    /// nothing propagates past this boundary.
    pub async fn call_tool(&self, name: &str, arguments: &Map<String, Value>) -> CallToolResult {
        if !self.has_tool(name) {
            return CallToolResult::error(format!("Tool '{}' not found", name));
        }

        match self.provider.call_tool(name, arguments).await {
            Ok(result) => result,
            Err(e) => {
                error!("Tool '{}' failed: {}", name, e);
                CallToolResult::error(e.to_string())
            }
        }
    }

    /// Read a resource, degrading failures to a text/plain error entry
    pub async fn read_resource(&self, uri: &str) -> ReadResourceResult {
        match self.provider.read_resource(uri).await {
            Ok(result) => result,
            Err(e) => {
                error!("Resource read for '{}' failed: {}", uri, e);
                ReadResourceResult::text(uri, "text/plain", format!("Error: {}", e))
            }
        }
    }

    /// Render a prompt; failures are logged and propagated
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<GetPromptResult, Error> {
        self.provider.get_prompt(name, arguments).await.map_err(|e| {
            error!("Prompt '{}' failed: {}", name, e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Provider whose listings always fail and whose one tool errors
    struct BrokenProvider;

    #[async_trait]
    impl ToolProvider for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        fn version(&self) -> &str {
            "0.0.1"
        }

        fn tools(&self) -> Result<Vec<Tool>, Error> {
            Err(Error::Tool("descriptor construction failed".to_string()))
        }

        async fn call_tool(
            &self,
            _name: &str,
            _arguments: &Map<String, Value>,
        ) -> Result<CallToolResult, Error> {
            Err(Error::Tool("unreachable".to_string()))
        }
    }

    struct EchoProvider;

    #[async_trait]
    impl ToolProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn version(&self) -> &str {
            "1.0.0"
        }

        fn tools(&self) -> Result<Vec<Tool>, Error> {
            Ok(vec![
                Tool::without_args("echo", "Echo the arguments back"),
                Tool::without_args("fail", "Always fails"),
            ])
        }

        async fn call_tool(
            &self,
            name: &str,
            arguments: &Map<String, Value>,
        ) -> Result<CallToolResult, Error> {
            match name {
                "echo" => Ok(CallToolResult::json(&Value::Object(arguments.clone()))),
                _ => Err(Error::Upstream("upstream API returned 503".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn listing_degrades_to_empty_on_provider_error() {
        let dispatcher = Dispatcher::new(Arc::new(BrokenProvider));
        assert!(dispatcher.list_tools().is_empty());
        assert!(dispatcher.list_resources().is_empty());
        assert!(dispatcher.list_prompts().is_empty());
    }

    #[tokio::test]
    async fn unknown_tool_yields_error_result_with_name() {
        let dispatcher = Dispatcher::new(Arc::new(EchoProvider));
        let result = dispatcher.call_tool("bogus", &Map::new()).await;
        assert!(result.is_error);
        let crate::types::Content::Text { text } = &result.content[0] else {
            panic!("expected text content");
        };
        assert!(text.contains("bogus"));
    }

    #[tokio::test]
    async fn provider_error_becomes_error_result() {
        let dispatcher = Dispatcher::new(Arc::new(EchoProvider));
        let result = dispatcher.call_tool("fail", &Map::new()).await;
        assert!(result.is_error);
        let crate::types::Content::Text { text } = &result.content[0] else {
            panic!("expected text content");
        };
        assert!(text.contains("503"));
    }

    #[tokio::test]
    async fn successful_call_has_non_empty_content() {
        let dispatcher = Dispatcher::new(Arc::new(EchoProvider));
        let mut args = Map::new();
        args.insert("q".to_string(), Value::String("gpu".to_string()));
        let result = dispatcher.call_tool("echo", &args).await;
        assert!(!result.is_error);
        assert!(!result.content.is_empty());
    }

    #[tokio::test]
    async fn resource_read_degrades_to_error_text() {
        let dispatcher = Dispatcher::new(Arc::new(EchoProvider));
        let result = dispatcher.read_resource("accessci://nope").await;
        assert_eq!(result.contents.len(), 1);
        assert_eq!(result.contents[0].uri, "accessci://nope");
        assert_eq!(result.contents[0].mime_type, "text/plain");
        assert!(result.contents[0].text.starts_with("Error: "));
    }

    #[tokio::test]
    async fn prompt_failure_propagates() {
        let dispatcher = Dispatcher::new(Arc::new(EchoProvider));
        assert!(dispatcher.get_prompt("greeting", &Map::new()).await.is_err());
    }
}
