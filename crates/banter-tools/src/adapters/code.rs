// Tool: execute_code
//
// Agent-facing wrapper around the banter-sandbox session adapter. The
// boundary parse resolves the bare-string/structured input union and performs
// local validation; anything past that point degrades inside the interpreter
// rather than raising.

use async_trait::async_trait;
use serde_json::Value;

use banter_sandbox::{CodeInterpreter, ExecutionInput, ExecutionRequest, SandboxConfig};

use crate::error::{Result, ToolsError};
use crate::tools::{Tool, ToolExecutionResult};

/// Tool that executes code in a remote sandboxed session
pub struct CodeInterpreterTool {
    interpreter: CodeInterpreter,
}

impl CodeInterpreterTool {
    /// Create the tool against the configured sandbox endpoint
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            interpreter: CodeInterpreter::new(config),
        }
    }

    /// Pure pre-submission check, available to callers ahead of dispatch.
    ///
    /// Accepts a bare code string or a structured request; rejects a missing
    /// code field or an unsupported language locally, before any remote call.
    pub fn parse_arguments(arguments: &Value) -> Result<ExecutionRequest> {
        let input: ExecutionInput = serde_json::from_value(arguments.clone())
            .map_err(|_| ToolsError::Validation(banter_sandbox::ValidationError::MissingCode))?;
        Ok(input.normalize()?)
    }
}

#[async_trait]
impl Tool for CodeInterpreterTool {
    fn name(&self) -> &str {
        "execute_code"
    }

    fn description(&self) -> &str {
        "Execute code in a secure sandboxed VM environment. Supports Python, JavaScript, and Bash."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The code to execute."
                },
                "language": {
                    "type": "string",
                    "enum": ["python", "javascript", "bash"],
                    "description": "Language of the code. Defaults to python."
                },
                "session_id": {
                    "type": "string",
                    "description": "Existing execution session to reuse. A new session is created when omitted."
                },
                "files": {
                    "type": "array",
                    "description": "Files to upload into the session before execution, in order.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "file_id": { "type": "string" },
                            "filename": { "type": "string" },
                            "content": { "type": "string" }
                        },
                        "required": ["file_id", "filename", "content"]
                    }
                }
            },
            "required": ["code"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, arguments: Value) -> ToolExecutionResult {
        let request = match Self::parse_arguments(&arguments) {
            Ok(request) => request,
            Err(err) => return ToolExecutionResult::tool_error(err.to_string()),
        };

        let result = self.interpreter.execute(request).await;
        match serde_json::to_value(&result) {
            Ok(value) => ToolExecutionResult::success(value),
            Err(err) => {
                ToolExecutionResult::tool_error(format!("Failed to encode execution result: {err}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_sandbox::Language;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(server: &MockServer) -> CodeInterpreterTool {
        CodeInterpreterTool::new(SandboxConfig::new(server.uri()))
    }

    #[test]
    fn schema_requires_code_only() {
        let tool = CodeInterpreterTool::new(SandboxConfig::default());
        let schema = tool.parameters_schema();

        assert_eq!(schema["required"], json!(["code"]));
        assert_eq!(
            schema["properties"]["language"]["enum"],
            json!(["python", "javascript", "bash"])
        );
    }

    #[test]
    fn bare_string_arguments_equal_structured_request() {
        let from_bare = CodeInterpreterTool::parse_arguments(&json!("print(1)")).unwrap();
        let from_structured =
            CodeInterpreterTool::parse_arguments(&json!({"code": "print(1)"})).unwrap();

        assert_eq!(from_bare, from_structured);
        assert_eq!(from_bare.language, Language::Python);
        assert!(from_bare.files.is_empty());
    }

    #[test]
    fn missing_code_raises_validation() {
        let err = CodeInterpreterTool::parse_arguments(&json!({})).unwrap_err();
        assert!(err.to_string().contains("Code parameter is required"));
    }

    #[test]
    fn unsupported_language_raises_validation() {
        let err =
            CodeInterpreterTool::parse_arguments(&json!({"code": "x", "language": "ruby"}))
                .unwrap_err();
        assert!(err.to_string().contains("Unsupported language: ruby"));
    }

    #[tokio::test]
    async fn invalid_arguments_become_tool_error() {
        let tool = CodeInterpreterTool::new(SandboxConfig::new("http://127.0.0.1:1"));

        let result = tool.execute(json!({"language": "python"})).await;
        match result {
            ToolExecutionResult::ToolError(msg) => {
                assert!(msg.contains("Code parameter is required"));
            }
            other => panic!("expected tool error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn happy_path_returns_execution_result_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "session_id": "S1" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/sessions/S1/execute"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "output": "Hello, World!"
            })))
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(json!({"code": "print(\"Hello, World!\")"}))
            .await;

        let value = result.into_value();
        assert_eq!(value["type"], "execute_code");
        assert_eq!(value["session_id"], "S1");
        assert_eq!(
            value["output"],
            json!([{"type": "output", "content": "Hello, World!"}])
        );
    }

    #[tokio::test]
    async fn transport_failure_is_degraded_data_not_tool_error() {
        let tool = CodeInterpreterTool::new(SandboxConfig::new("http://127.0.0.1:1"));

        let result = tool.execute(json!({"code": "print(1)"})).await;
        assert!(result.is_success());

        let value = result.into_value();
        assert_eq!(value["output"][0]["type"], "error");
        assert!(value["output"][0]["content"]
            .as_str()
            .unwrap()
            .starts_with("Failed to execute code:"));
    }
}
