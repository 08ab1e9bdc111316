//! Resource descriptors and contents
//!
//! Resources are URI-addressed documents under the `accessci://` scheme.
//! Like tools, their descriptors are fixed at server construction.

use serde::{Deserialize, Serialize};

/// Static descriptor for a readable resource
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Resource {
    /// Unique URI of the resource (scheme `accessci://`)
    pub uri: String,
    /// Human-readable name
    pub name: String,
    /// Description of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type of the contents
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl Resource {
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description,
            mime_type: mime_type.into(),
        }
    }
}

/// One contents entry of a resource read
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceContents {
    /// URI the contents belong to
    pub uri: String,
    /// MIME type of this entry
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Textual contents
    pub text: String,
}

/// Result of reading a resource
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReadResourceResult {
    /// Contents entries for the requested URI
    pub contents: Vec<ResourceContents>,
}

impl ReadResourceResult {
    /// Single text entry for the given URI
    pub fn text(uri: impl Into<String>, mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            contents: vec![ResourceContents {
                uri: uri.into(),
                mime_type: mime_type.into(),
                text: text.into(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_serializes_mime_type_camel_case() {
        let resource = Resource::new(
            "accessci://system-status",
            "System status",
            None,
            "application/json",
        );
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["mimeType"], "application/json");
        assert!(value.get("description").is_none());
    }
}
