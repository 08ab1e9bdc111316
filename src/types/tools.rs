//! Tool descriptors and invocation payloads
//!
//! A [`Tool`] is a static descriptor enumerated by `tools/list` and
//! `GET /tools`; a [`CallToolResult`] is what every invocation returns,
//! successful or not. Field names follow the MCP wire convention
//! (`inputSchema`, `isError`, `mimeType`).

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Static descriptor for a callable tool
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tool {
    /// Unique name of the tool within its server
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON-schema-shaped description of the accepted arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl Tool {
    /// Create a tool descriptor with the given input schema
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Create a tool descriptor that takes no arguments
    pub fn without_args(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            serde_json::json!({ "type": "object", "properties": {} }),
        )
    }
}

/// Parameters of a `tools/call` request
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CallToolParams {
    /// Name of the tool to call
    #[serde(default)]
    pub name: String,
    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// One entry of a tool result's content array
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Plain text payload
    Text {
        /// The text content
        text: String,
    },
    /// Base64-encoded image payload
    Image {
        /// Base64 image data
        data: String,
        /// Image MIME type
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl Content {
    /// Text content from anything stringly
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    /// Image content from raw bytes, base64-encoded on the way in
    pub fn image(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Content::Image {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }
}

/// Result of calling a tool
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CallToolResult {
    /// Content of the tool call result
    pub content: Vec<Content>,
    /// Whether this result represents a failure
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl CallToolResult {
    /// Successful result with a single text entry
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
            is_error: false,
        }
    }

    /// Successful result whose text entry is pretty-printed JSON
    pub fn json(value: &Value) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self::text(text)
    }

    /// Error result whose payload is a JSON `{"error": message}` object
    pub fn error(message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "error": message.into() });
        Self {
            content: vec![Content::text(body.to_string())],
            is_error: true,
        }
    }
}
