// Code-execution session chain
//
// A strictly sequential request chain against the remote service:
// optional session-create -> sequential file uploads -> execute.
// Any transport failure along the chain is absorbed into the result as a
// single `error` output item; the caller never sees a raised error here.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::SandboxConfig;
use crate::types::{ExecutionOutput, ExecutionRequest, ExecutionResult, FileAttachment, Language};

/// Download path prefix exposed to callers for generated files
pub const DOWNLOAD_PATH_PREFIX: &str = "/api/files/code/download";

/// Failures along the request chain. Never escapes `execute`; the message
/// becomes the degraded result's error content.
#[derive(Debug, Error)]
enum SandboxError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{operation} returned status {status}")]
    Status { operation: &'static str, status: u16 },
}

/// Adapter for the remote code-execution service.
///
/// Holds an immutable configuration for its lifetime; each invocation is an
/// independent chain of blocking-from-the-caller's-perspective requests with
/// no shared mutable state.
pub struct CodeInterpreter {
    client: Client,
    config: SandboxConfig,
}

impl CodeInterpreter {
    /// Create an adapter for the configured sandbox endpoint
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// The configuration this adapter was constructed with
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Run the full chain for one validated request.
    ///
    /// On success the result carries one `output` item followed by a `file`
    /// item per generated file. On a remote execution error it carries exactly
    /// one `error` item and no files. Transport failures degrade the same way;
    /// the session id is reported whenever one was known before the failure.
    pub async fn execute(&self, request: ExecutionRequest) -> ExecutionResult {
        let mut session_id = request.session_id.clone();
        match self.run(&request, &mut session_id).await {
            Ok(output) => ExecutionResult::new(output, session_id),
            Err(err) => {
                error!(error = %err, "code execution failed");
                ExecutionResult::new(
                    vec![ExecutionOutput::Error {
                        content: format!("Failed to execute code: {err}"),
                    }],
                    session_id,
                )
            }
        }
    }

    async fn run(
        &self,
        request: &ExecutionRequest,
        session_id: &mut Option<String>,
    ) -> Result<Vec<ExecutionOutput>, SandboxError> {
        let sid = match session_id {
            Some(id) => id.clone(),
            None => {
                let id = self.create_session(request.language).await?;
                *session_id = Some(id.clone());
                id
            }
        };

        for file in &request.files {
            self.upload_file(&sid, file).await?;
        }

        let response = self.execute_code(&sid, request).await?;
        Ok(map_response(&sid, response))
    }

    async fn create_session(&self, language: Language) -> Result<String, SandboxError> {
        debug!(%language, "creating sandbox session");
        let url = format!("{}/api/v1/sessions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateSessionBody {
                language,
                memory_limit: &self.config.memory_limit,
                timeout: self.config.timeout_secs,
            })
            .send()
            .await?;
        let response = check_status("session create", response)?;
        let body: CreateSessionResponse = response.json().await?;
        debug!(session_id = %body.session_id, "sandbox session created");
        Ok(body.session_id)
    }

    async fn upload_file(
        &self,
        session_id: &str,
        file: &FileAttachment,
    ) -> Result<(), SandboxError> {
        debug!(session_id, file_id = %file.file_id, "uploading file to sandbox session");
        let url = format!(
            "{}/api/v1/sessions/{}/files",
            self.config.base_url, session_id
        );
        let response = self
            .client
            .post(&url)
            .json(&UploadFileBody {
                file_id: &file.file_id,
                name: &file.filename,
                content: &file.content,
            })
            .send()
            .await?;
        check_status("file upload", response)?;
        Ok(())
    }

    async fn execute_code(
        &self,
        session_id: &str,
        request: &ExecutionRequest,
    ) -> Result<ExecuteResponse, SandboxError> {
        debug!(session_id, language = %request.language, "executing code in sandbox session");
        let url = format!(
            "{}/api/v1/sessions/{}/execute",
            self.config.base_url, session_id
        );
        let response = self
            .client
            .post(&url)
            .json(&ExecuteBody {
                code: &request.code,
                language: request.language,
            })
            .send()
            .await?;
        let response = check_status("execute", response)?;
        Ok(response.json().await?)
    }
}

fn check_status(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, SandboxError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SandboxError::Status {
            operation,
            status: status.as_u16(),
        })
    }
}

/// Map the remote execute response into the ordered output sequence.
///
/// An error field short-circuits: one `error` item concatenating the error
/// message and any partial output, and no `file` items even if the response
/// listed generated files.
fn map_response(session_id: &str, response: ExecuteResponse) -> Vec<ExecutionOutput> {
    if let Some(err) = response.error {
        return vec![ExecutionOutput::Error {
            content: format!("Error: {}\n{}", err, response.output.unwrap_or_default()),
        }];
    }

    let mut output = vec![ExecutionOutput::Output {
        content: response.output.unwrap_or_default(),
    }];
    for file in response.files.unwrap_or_default() {
        output.push(ExecutionOutput::File {
            path: format!("{DOWNLOAD_PATH_PREFIX}/{session_id}/{}", file.id),
            file_id: file.id,
            name: file.name,
        });
    }
    output
}

// ============================================================================
// Wire types for the sandbox HTTP API
// ============================================================================

#[derive(Serialize)]
struct CreateSessionBody<'a> {
    language: Language,
    memory_limit: &'a str,
    timeout: u64,
}

#[derive(Deserialize)]
struct CreateSessionResponse {
    session_id: String,
}

#[derive(Serialize)]
struct UploadFileBody<'a> {
    file_id: &'a str,
    name: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ExecuteBody<'a> {
    code: &'a str,
    language: Language,
}

#[derive(Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    files: Option<Vec<RemoteFile>>,
}

#[derive(Deserialize)]
struct RemoteFile {
    id: String,
    name: String,
}
