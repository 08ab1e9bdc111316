//! The seam between the dispatch core and a concrete server
//!
//! Each ACCESS-CI server (compute resources, events, NSF awards, ...)
//! implements [`ToolProvider`] and owns all domain logic. The trait
//! replaces the abstract-base-class-with-overrides structure of earlier
//! implementations: required members cover tools, defaulted members make
//! resources and prompts opt-in.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::Error;
use crate::types::{CallToolResult, GetPromptResult, Prompt, ReadResourceResult, Resource, Tool};

/// Capability set of a concrete tool server
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Server name reported in `serverInfo` and `/health`
    fn name(&self) -> &str;

    /// Server version reported in `serverInfo` and `/health`
    fn version(&self) -> &str;

    /// The fixed tool list.
    ///
    /// An `Err` here is degraded to an empty list by the dispatcher, so
    /// listing never breaks a calling agent's turn-taking loop.
    fn tools(&self) -> Result<Vec<Tool>, Error>;

    /// The fixed resource list; empty by default
    fn resources(&self) -> Result<Vec<Resource>, Error> {
        Ok(Vec::new())
    }

    /// The fixed prompt list; empty by default
    fn prompts(&self) -> Result<Vec<Prompt>, Error> {
        Ok(Vec::new())
    }

    /// Execute a tool. The dispatcher has already checked that `name`
    /// is present in [`tools`](ToolProvider::tools).
    async fn call_tool(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<CallToolResult, Error>;

    /// Read a resource by URI; unsupported unless overridden
    async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, Error> {
        Err(Error::Resource(format!(
            "Resource reads are not supported by this server (uri: {})",
            uri
        )))
    }

    /// Render a prompt by name; unsupported unless overridden
    async fn get_prompt(
        &self,
        name: &str,
        _arguments: &Map<String, Value>,
    ) -> Result<GetPromptResult, Error> {
        Err(Error::Prompt(format!(
            "Prompts are not supported by this server (prompt: {})",
            name
        )))
    }
}
