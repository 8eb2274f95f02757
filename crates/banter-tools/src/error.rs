// Error types for the tool layer

use thiserror::Error;

/// Result type alias for tool-layer operations
pub type Result<T> = std::result::Result<T, ToolsError>;

/// Errors raised by the tool layer.
///
/// Note the split with adapter degradation: a `ToolsError` is raised to the
/// immediate caller (bad arguments, misconfigured registry), while remote and
/// transport failures inside an adapter are returned as data in the tool's
/// result payload.
#[derive(Debug, Error)]
pub enum ToolsError {
    /// Local input validation failure
    #[error("Validation failed: {0}")]
    Validation(#[from] banter_sandbox::ValidationError),

    /// Registry or startup configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dispatch target is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ToolsError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        ToolsError::Configuration(msg.into())
    }

    /// Create an unknown-tool error
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        ToolsError::UnknownTool(name.into())
    }
}
