// Sandbox service configuration
//
// The environment read happens once, at the composition root, via `from_env`.
// The adapter itself receives an immutable config at construction.

use serde::{Deserialize, Serialize};

/// Default sandbox endpoint when the environment does not override it
pub const DEFAULT_BASE_URL: &str = "http://localhost:6666";

/// Memory limit sent with every session-creation request
pub const DEFAULT_MEMORY_LIMIT: &str = "256m";

/// Execution timeout (seconds) sent with every session-creation request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the sandbox endpoint
pub const BASE_URL_ENV: &str = "BANTER_SANDBOX_URL";

/// Configuration for the code-execution adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Base address of the remote execution service
    pub base_url: String,

    /// Memory limit for new sessions (e.g. "256m")
    pub memory_limit: String,

    /// Execution timeout for new sessions, in seconds
    pub timeout_secs: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SandboxConfig {
    /// Create a configuration with the given base URL and default limits
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            memory_limit: DEFAULT_MEMORY_LIMIT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the base URL from `BANTER_SANDBOX_URL`, falling back to defaults
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Set the session memory limit
    pub fn with_memory_limit(mut self, memory_limit: impl Into<String>) -> Self {
        self.memory_limit = memory_limit.into();
        self
    }

    /// Set the session execution timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
