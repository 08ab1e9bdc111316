//! Wire types shared by every transport
//!
//! Tool, resource, and prompt descriptors are created once at server
//! construction and never mutated afterwards; results are built per
//! invocation and serialized straight onto the wire.

pub mod prompts;
pub mod resources;
pub mod tools;

pub use prompts::{GetPromptResult, Prompt, PromptArgument, PromptMessage};
pub use resources::{ReadResourceResult, Resource, ResourceContents};
pub use tools::{CallToolParams, CallToolResult, Content, Tool};
