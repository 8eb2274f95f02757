// Remote code-execution session adapter
//
// Design decisions:
// - The remote service owns the session; this crate only carries its opaque id
// - Input arrives as either a bare code string or a structured request and is
//   normalized once at the boundary into one typed shape
// - Validation errors are raised to the caller; transport and remote execution
//   failures are absorbed into the result as a single `error` output item so a
//   conversational agent can display them without a separate error path

pub mod config;
pub mod interpreter;
pub mod types;

pub use config::SandboxConfig;
pub use interpreter::CodeInterpreter;
pub use types::{
    ExecutionInput, ExecutionOutput, ExecutionRequest, ExecutionResult, FileAttachment, Language,
    ValidationError,
};
