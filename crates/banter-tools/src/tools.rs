// Tool abstraction for the agent layer
//
// Tools are defined via the `Tool` trait and held in a `ToolRegistry` that
// dispatches by name. The registry is strict: registering two tools under the
// same name is a configuration error, never a silent replacement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::error::{Result, ToolsError};

// ============================================================================
// Tool Execution Result - Error Handling Contract
// ============================================================================

/// Result of a tool execution.
///
/// - `Success`: the tool ran; the payload goes back to the conversation. A
///   degraded adapter result (e.g. a sandbox transport failure reported as an
///   `error` output item) is still `Success` - the failure is data.
/// - `ToolError`: the call itself was rejected (validation, bad arguments).
///   This is the raised channel at the agent boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolExecutionResult {
    /// Successful execution with a JSON payload
    Success(Value),

    /// Tool-level error message for the conversation
    ToolError(String),
}

impl ToolExecutionResult {
    /// Create a successful result
    pub fn success(value: impl Into<Value>) -> Self {
        ToolExecutionResult::Success(value.into())
    }

    /// Create a tool-level error
    pub fn tool_error(message: impl Into<String>) -> Self {
        ToolExecutionResult::ToolError(message.into())
    }

    /// Check if this is a successful result
    pub fn is_success(&self) -> bool {
        matches!(self, ToolExecutionResult::Success(_))
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Package the result as a single JSON value for the conversation.
    ///
    /// A `ToolError` becomes `{"error": message}` so the result field always
    /// carries the payload and the agent continues the same way for both
    /// outcomes.
    pub fn into_value(self) -> Value {
        match self {
            ToolExecutionResult::Success(value) => value,
            ToolExecutionResult::ToolError(message) => serde_json::json!({ "error": message }),
        }
    }
}

// ============================================================================
// Tool Trait
// ============================================================================

/// Trait for implementing tools that an agent can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's unique name.
    ///
    /// This name is used by the LLM to invoke the tool and must be unique
    /// within a ToolRegistry.
    fn name(&self) -> &str;

    /// Returns a description of what the tool does
    fn description(&self) -> &str;

    /// Returns the JSON schema for the tool's parameters
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    ///
    /// Arguments should conform to the schema returned by
    /// `parameters_schema()`.
    async fn execute(&self, arguments: Value) -> ToolExecutionResult;

    /// Convert this tool to the advertisable form handed to an LLM provider
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Tool definition advertised to an LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

// ============================================================================
// ToolRegistry
// ============================================================================

/// A registry holding tools by name.
///
/// Registration is strict: a duplicate name is a configuration error rather
/// than a shadowing replacement.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, rejecting duplicate names
    pub fn register(&mut self, tool: impl Tool + 'static) -> Result<()> {
        self.register_arc(Arc::new(tool))
    }

    /// Register an Arc-wrapped tool, rejecting duplicate names
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolsError::config(format!(
                "duplicate tool registration: {name}"
            )));
        }
        info!(tool = %name, "registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Get definitions for all registered tools
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// Execute a registered tool by name.
    ///
    /// An unregistered name is raised as `UnknownTool`; everything the tool
    /// itself reports comes back inside the `ToolExecutionResult`.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> Result<ToolExecutionResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolsError::unknown_tool(name))?;
        Ok(tool.execute(arguments).await)
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}
