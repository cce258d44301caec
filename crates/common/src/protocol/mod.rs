pub mod definitions;
pub mod envelope;
pub mod tool_names;

pub use definitions::{tool_definitions, ToolDefinition};
pub use envelope::{ToolCall, ToolError, ToolResponse};
