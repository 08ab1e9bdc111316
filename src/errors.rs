//! Error Types
//!
//! This module defines the error type shared by the dispatch core,
//! transports, and outbound clients, providing type-safe handling for
//! protocol failures, upstream API problems, and misconfiguration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error data for JSON-RPC error responses
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorData {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Optional additional data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// The main Error type for the dispatch core
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-related errors
    #[error("Transport error: {0}")]
    Transport(String),

    /// Protocol errors (e.g., invalid message format)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Method not found
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool errors
    #[error("Tool error: {0}")]
    Tool(String),

    /// Resource errors
    #[error("Resource error: {0}")]
    Resource(String),

    /// Prompt errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Server-side misconfiguration (missing environment variable, bad
    /// service map entry)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote peer-server call failures
    #[error("Service error: {0}")]
    Service(String),

    /// Upstream API failure reaching or reading a wrapped external API
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Authorization error (rejected API key)
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    /// Parse error
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid request
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid params
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl Error {
    /// Convert an error to a JSON-RPC error code
    pub fn to_code(&self) -> i32 {
        use error_codes::*;
        match self {
            Error::Json(_) => PARSE_ERROR,
            Error::Protocol(_) => INVALID_REQUEST,
            Error::MethodNotFound(_) => METHOD_NOT_FOUND,
            Error::InvalidParams(_) => INVALID_PARAMS,
            _ => INTERNAL_ERROR,
        }
    }

    /// Build the JSON-RPC error payload for this error
    pub fn to_error_data(&self) -> ErrorData {
        ErrorData {
            code: self.to_code(),
            message: self.to_string(),
            data: None,
        }
    }
}
