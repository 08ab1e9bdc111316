//! Transport adapters
//!
//! A server process binds exactly one primary transport at startup and
//! keeps it for its lifetime: HTTP (plus SSE sessions) when a port is
//! configured, STDIO otherwise. The STDIO channel is never started when
//! an HTTP port is present.

pub mod http;
pub mod sse;
pub mod stdio;

use crate::config::ServerConfig;

/// The one-time transport choice for a server process
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportMode {
    /// Line-oriented JSON-RPC over stdin/stdout for a single local client
    Stdio,
    /// HTTP surface (health, tools, SSE sessions) on the given port
    Http(u16),
}

impl TransportMode {
    /// Pick the mode from configuration: `PORT` set selects HTTP
    pub fn from_config(config: &ServerConfig) -> Self {
        match config.port {
            Some(port) => TransportMode::Http(port),
            None => TransportMode::Stdio,
        }
    }
}
