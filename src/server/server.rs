//! Server assembly and startup
//!
//! A [`Server`] ties a concrete provider to configuration and runs the
//! transport selected at startup. The choice is made once per process:
//! a configured port selects the HTTP surface, otherwise the server
//! speaks JSON-RPC over stdin/stdout.

use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::errors::Error;
use crate::logging;
use crate::server::dispatcher::Dispatcher;
use crate::server::provider::ToolProvider;
use crate::server::rpc::RpcSession;
use crate::transport::http::{self, AppState};
use crate::transport::{stdio, TransportMode};

/// A runnable ACCESS MCP server
pub struct Server {
    dispatcher: Dispatcher,
    config: ServerConfig,
    require_api_key: bool,
}

impl Server {
    /// Create a new server builder
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// The dispatcher bound to this server's provider
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// This server's configuration snapshot
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Shared state for the HTTP surface
    pub fn app_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(
            self.dispatcher.clone(),
            self.require_api_key,
            self.config.inbound_api_key.clone(),
        ))
    }

    /// Run the server until the transport shuts down.
    ///
    /// Installs logging, then binds the transport chosen by
    /// configuration.
    pub async fn run(&self) -> Result<(), Error> {
        logging::init(&self.config.log_level);

        match TransportMode::from_config(&self.config) {
            TransportMode::Http(port) => {
                let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
                    .await
                    .map_err(|e| Error::Transport(format!("Failed to bind port {}: {}", port, e)))?;
                http::serve(listener, self.app_state()).await
            }
            TransportMode::Stdio => {
                info!("{} starting in STDIO mode", self.dispatcher.server_name());
                let session = RpcSession::new(self.dispatcher.clone());
                stdio::run(&session).await
            }
        }
    }

    /// Serve the HTTP surface on an already bound listener.
    ///
    /// Used by tests and embedders that want an ephemeral port.
    pub async fn serve_http(&self, listener: tokio::net::TcpListener) -> Result<(), Error> {
        http::serve(listener, self.app_state()).await
    }
}

/// Builder for configuring and creating a [`Server`]
pub struct ServerBuilder {
    provider: Option<Arc<dyn ToolProvider>>,
    config: Option<ServerConfig>,
    require_api_key: bool,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            config: None,
            require_api_key: false,
        }
    }

    /// Set the concrete provider
    pub fn provider(mut self, provider: Arc<dyn ToolProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Supply a configuration snapshot instead of reading the environment
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Require a matching `X-Api-Key` header on HTTP tool invocations
    pub fn require_api_key(mut self, require: bool) -> Self {
        self.require_api_key = require;
        self
    }

    /// Build the server; fails if no provider was supplied
    pub fn build(self) -> Result<Server, Error> {
        let provider = self
            .provider
            .ok_or_else(|| Error::Protocol("No provider configured for server".to_string()))?;
        let config = self.config.unwrap_or_else(ServerConfig::from_env);

        Ok(Server {
            dispatcher: Dispatcher::new(provider),
            config,
            require_api_key: self.require_api_key,
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
