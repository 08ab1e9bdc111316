//! Server-side dispatch core
//!
//! [`provider::ToolProvider`] is the seam concrete servers implement;
//! [`dispatcher::Dispatcher`] wraps a provider in the failure boundary;
//! [`rpc::RpcSession`] binds a dispatcher to the JSON-RPC method set
//! used by the STDIO transport and by every SSE session.

pub mod dispatcher;
pub mod provider;
pub mod rpc;
pub mod server;

pub use dispatcher::Dispatcher;
pub use provider::ToolProvider;
pub use rpc::RpcSession;
pub use server::{Server, ServerBuilder};
