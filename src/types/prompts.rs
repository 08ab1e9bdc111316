//! Prompt descriptors and retrieval results

use serde::{Deserialize, Serialize};

use crate::types::tools::Content;

/// Static descriptor for a parameterized prompt template
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Unique name of the prompt
    pub name: String,
    /// Description of the prompt
    pub description: String,
    /// Ordered argument list
    #[serde(default)]
    pub arguments: Vec<PromptArgument>,
}

/// One declared prompt argument
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PromptArgument {
    /// Argument name
    pub name: String,
    /// Description of the argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the argument must be supplied
    #[serde(default)]
    pub required: bool,
}

/// One message of a rendered prompt
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PromptMessage {
    /// Message role, `user` or `assistant`
    pub role: String,
    /// Message content
    pub content: Content,
}

/// Result of `prompts/get`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GetPromptResult {
    /// Description of the rendered prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rendered messages
    pub messages: Vec<PromptMessage>,
}
