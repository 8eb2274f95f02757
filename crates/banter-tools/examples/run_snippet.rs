//! Composition-root example: read configuration from the environment, build
//! the default tool registry, and run one code snippet through the
//! `execute_code` tool.
//!
//! Prerequisites:
//! - A sandbox service listening at BANTER_SANDBOX_URL
//!   (defaults to http://localhost:6666)
//!
//! Run with: cargo run -p banter-tools --example run_snippet

use banter_tools::{builtin_tools, ToolsConfig};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // The one environment read happens here, at the composition root
    let config = ToolsConfig::from_env();
    let registry = builtin_tools(config)?;
    println!("registered tools: {:?}", registry.tool_names());

    let result = registry
        .dispatch("execute_code", json!({"code": "print(\"Hello, World!\")"}))
        .await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&result.into_value())?
    );
    Ok(())
}
