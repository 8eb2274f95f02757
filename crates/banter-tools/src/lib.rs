// Agent-facing tool layer
//
// This crate provides the Tool trait, the strict registration table, and the
// built-in adapters (code execution via banter-sandbox, DuckDuckGo search).
//
// Design decisions:
// - Tools are looked up by name; duplicate registrations are rejected
// - Validation failures surface as ToolError (the raised channel); transport
//   failures inside an adapter surface as degraded Success data
// - Configuration is assembled once at the composition root (ToolsConfig)

pub mod adapters;
pub mod config;
pub mod error;
pub mod tools;

pub use adapters::{CodeInterpreterTool, DuckDuckGoSearchTool};
pub use config::{builtin_tools, SearchConfig, ToolsConfig};
pub use error::{Result, ToolsError};
pub use tools::{Tool, ToolDefinition, ToolExecutionResult, ToolRegistry};
