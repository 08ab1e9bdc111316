//! ACCESS-CI MCP Dispatch Core
//!
//! This crate provides the shared base for ACCESS-CI MCP tool servers: a
//! registry/dispatch layer bound to one of several transports (STDIO for
//! local embedding, HTTP + SSE for remote sessions), ambient per-request
//! context propagation, and an outbound client for calling tools exposed
//! by peer servers. Concrete servers implement [`ToolProvider`] and hand
//! it to a [`Server`]; everything else is wiring supplied here.

pub mod client;
pub mod config;
pub mod context;
pub mod errors;
pub mod logging;
pub mod outbound;
pub mod server;
pub mod transport;
pub mod types;

// Re-export commonly used items
pub use client::RemoteToolClient;
pub use config::{ServerConfig, ServiceMap};
pub use context::RequestContext;
pub use errors::Error;
pub use server::dispatcher::Dispatcher;
pub use server::provider::ToolProvider;
pub use server::server::{Server, ServerBuilder};
