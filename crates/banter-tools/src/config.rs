// Composition-root configuration and the built-in registration table
//
// The process environment is read exactly once, here, via
// `ToolsConfig::from_env`. Adapters receive explicit config structs at
// construction and never touch the environment themselves.

use serde::{Deserialize, Serialize};
use tracing::info;

use banter_sandbox::SandboxConfig;

use crate::adapters::{CodeInterpreterTool, DuckDuckGoSearchTool};
use crate::error::Result;
use crate::tools::ToolRegistry;

/// DuckDuckGo Instant Answer API endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://api.duckduckgo.com";

/// Configuration for the web search adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base address of the search service (overridable for tests)
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

impl SearchConfig {
    /// Create a configuration with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Configuration for all built-in tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub sandbox: SandboxConfig,
    pub search: SearchConfig,
}

impl ToolsConfig {
    /// Read configuration from the process environment.
    ///
    /// This is the one environment read in the tool layer.
    pub fn from_env() -> Self {
        Self {
            sandbox: SandboxConfig::from_env(),
            search: SearchConfig::default(),
        }
    }
}

/// Build the startup registration table of built-in tools.
///
/// Registers `execute_code` and `duckduckgo_search`. A duplicate name is a
/// configuration error.
pub fn builtin_tools(config: ToolsConfig) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(CodeInterpreterTool::new(config.sandbox))?;
    registry.register(DuckDuckGoSearchTool::new(&config.search))?;
    info!(tools = registry.len(), "built default tool registry");
    Ok(registry)
}
