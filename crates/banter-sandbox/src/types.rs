// Request and result types for the code-execution adapter
//
// Design Decision: callers may pass either a bare code string or a structured
// request. The two shapes are resolved once at the boundary (ExecutionInput ->
// ExecutionRequest) so everything downstream operates on one normalized form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tag carried by every execution result
pub const RESULT_TYPE: &str = "execute_code";

/// Validation failures detected locally, before any remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The code field is missing or empty
    #[error("Code parameter is required")]
    MissingCode,

    /// A language was supplied but is not one of the supported values
    #[error("Unsupported language: {0}. Supported languages are: python, javascript, bash")]
    UnsupportedLanguage(String),
}

/// Languages the remote execution service supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    Javascript,
    Bash,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Bash => "bash",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::Javascript),
            "bash" => Ok(Language::Bash),
            other => Err(ValidationError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// A file transferred verbatim into the remote session before execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub file_id: String,
    pub filename: String,
    pub content: String,
}

/// Boundary input: a bare code string or a structured request.
///
/// A bare string is equivalent to a structured request with the default
/// language and no files. `normalize` resolves both into `ExecutionRequest`,
/// performing the same checks as `validate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExecutionInput {
    Code(String),
    Request(RawExecutionRequest),
}

/// Structured request as it arrives from the caller, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExecutionRequest {
    pub code: Option<String>,
    pub language: Option<String>,
    pub session_id: Option<String>,
    #[serde(default)]
    pub files: Vec<FileAttachment>,
}

impl ExecutionInput {
    /// Pure pre-submission check: missing code and unsupported languages are
    /// rejected here, never shipped to the remote service.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ExecutionInput::Code(code) => {
                if code.is_empty() {
                    return Err(ValidationError::MissingCode);
                }
            }
            ExecutionInput::Request(raw) => {
                match &raw.code {
                    Some(code) if !code.is_empty() => {}
                    _ => return Err(ValidationError::MissingCode),
                }
                if let Some(language) = &raw.language {
                    language.parse::<Language>()?;
                }
            }
        }
        Ok(())
    }

    /// Resolve the input union into one normalized request
    pub fn normalize(self) -> Result<ExecutionRequest, ValidationError> {
        match self {
            ExecutionInput::Code(code) => {
                if code.is_empty() {
                    return Err(ValidationError::MissingCode);
                }
                Ok(ExecutionRequest::new(code))
            }
            ExecutionInput::Request(raw) => {
                let code = match raw.code {
                    Some(code) if !code.is_empty() => code,
                    _ => return Err(ValidationError::MissingCode),
                };
                let language = match raw.language {
                    Some(language) => language.parse()?,
                    None => Language::default(),
                };
                Ok(ExecutionRequest {
                    code,
                    language,
                    session_id: raw.session_id,
                    files: raw.files,
                })
            }
        }
    }
}

/// A validated execution request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileAttachment>,
}

impl ExecutionRequest {
    /// Create a request with the default language and no files
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: Language::default(),
            session_id: None,
            files: Vec::new(),
        }
    }

    /// Set the language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Reuse an existing remote session
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Attach files to upload before execution
    pub fn with_files(mut self, files: Vec<FileAttachment>) -> Self {
        self.files = files;
        self
    }
}

/// One unit of the adapter's result sequence.
///
/// `Output` and `Error` are mutually exclusive per call; `File` items follow
/// the `Output` item only on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutionOutput {
    Output { content: String },
    Error { content: String },
    File { file_id: String, name: String, path: String },
}

/// The adapter's result: an ordered output sequence plus the session id.
///
/// `session_id` is absent only when the call failed before a session existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub output: Vec<ExecutionOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ExecutionResult {
    pub fn new(output: Vec<ExecutionOutput>, session_id: Option<String>) -> Self {
        Self {
            kind: RESULT_TYPE.to_string(),
            output,
            session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_supported_values() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!(
            "javascript".parse::<Language>().unwrap(),
            Language::Javascript
        );
        assert_eq!("bash".parse::<Language>().unwrap(), Language::Bash);
    }

    #[test]
    fn language_rejects_unsupported_value() {
        let err = "ruby".parse::<Language>().unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedLanguage("ruby".to_string()));
        assert!(err.to_string().contains("ruby"));
        assert!(err.to_string().contains("python, javascript, bash"));
    }

    #[test]
    fn language_default_is_python() {
        assert_eq!(Language::default(), Language::Python);
    }

    #[test]
    fn bare_string_normalizes_to_python_request_without_files() {
        let input: ExecutionInput = serde_json::from_value(serde_json::json!("print(1)")).unwrap();
        let request = input.normalize().unwrap();

        assert_eq!(request, ExecutionRequest::new("print(1)"));
        assert_eq!(request.language, Language::Python);
        assert!(request.files.is_empty());
        assert!(request.session_id.is_none());
    }

    #[test]
    fn structured_input_normalizes_with_explicit_fields() {
        let input: ExecutionInput = serde_json::from_value(serde_json::json!({
            "code": "ls",
            "language": "bash",
            "session_id": "S1",
            "files": [{"file_id": "F1", "filename": "data.txt", "content": "42"}]
        }))
        .unwrap();
        let request = input.normalize().unwrap();

        assert_eq!(request.language, Language::Bash);
        assert_eq!(request.session_id.as_deref(), Some("S1"));
        assert_eq!(request.files.len(), 1);
        assert_eq!(request.files[0].file_id, "F1");
    }

    #[test]
    fn missing_code_is_a_validation_error() {
        let input: ExecutionInput = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(input.validate(), Err(ValidationError::MissingCode));
        assert_eq!(input.normalize().unwrap_err(), ValidationError::MissingCode);
    }

    #[test]
    fn empty_code_is_a_validation_error() {
        let input: ExecutionInput = serde_json::from_value(serde_json::json!("")).unwrap();
        assert_eq!(input.validate(), Err(ValidationError::MissingCode));
    }

    #[test]
    fn validate_names_the_unsupported_language() {
        let input: ExecutionInput = serde_json::from_value(serde_json::json!({
            "code": "puts 1",
            "language": "ruby"
        }))
        .unwrap();
        assert_eq!(
            input.validate(),
            Err(ValidationError::UnsupportedLanguage("ruby".to_string()))
        );
    }

    #[test]
    fn validate_accepts_bare_string_and_structured_code() {
        let bare: ExecutionInput =
            serde_json::from_value(serde_json::json!("print(\"test\")")).unwrap();
        assert!(bare.validate().is_ok());

        let structured: ExecutionInput =
            serde_json::from_value(serde_json::json!({"code": "test"})).unwrap();
        assert!(structured.validate().is_ok());
    }

    #[test]
    fn output_items_serialize_tagged() {
        let output = ExecutionOutput::Output {
            content: "Hello".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({"type": "output", "content": "Hello"})
        );

        let file = ExecutionOutput::File {
            file_id: "F1".to_string(),
            name: "plot.png".to_string(),
            path: "/api/files/code/download/S1/F1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&file).unwrap(),
            serde_json::json!({
                "type": "file",
                "file_id": "F1",
                "name": "plot.png",
                "path": "/api/files/code/download/S1/F1"
            })
        );
    }

    #[test]
    fn result_serializes_kind_and_skips_absent_session() {
        let result = ExecutionResult::new(
            vec![ExecutionOutput::Error {
                content: "Failed to execute code: connection refused".to_string(),
            }],
            None,
        );
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["type"], "execute_code");
        assert!(value.get("session_id").is_none());
    }

    #[test]
    fn result_round_trips_with_session() {
        let result = ExecutionResult::new(
            vec![ExecutionOutput::Output {
                content: "Hello, World!".to_string(),
            }],
            Some("S1".to_string()),
        );
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ExecutionResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, result);
        assert_eq!(parsed.session_id.as_deref(), Some("S1"));
    }
}
