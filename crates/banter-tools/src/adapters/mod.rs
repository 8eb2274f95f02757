// Built-in tool adapters
//
// Each adapter is a self-contained request/response translator over one
// third-party HTTP API. Each lives in its own file with collocated tests.

mod code;
mod duckduckgo;

pub use code::CodeInterpreterTool;
pub use duckduckgo::DuckDuckGoSearchTool;
