//! Completion Client Module
//!
//! The synchronous "generate text completion for a prompt" capability the
//! backend-assisted strategy depends on. The transport behind it (remote
//! chat service, controlled browser session, local CLI) is not this
//! crate's concern; [`CommandCompletionClient`] covers the common case of
//! an external command that takes the prompt and prints the completion.

use std::path::PathBuf;
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single completion call. No retries happen at this level;
/// a failure triggers an immediate fallback in the calling strategy.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion backend timed out after {0:?}")]
    Timeout(Duration),

    #[error("completion backend unavailable: {0}")]
    Unavailable(String),

    #[error("completion session malformed: {0}")]
    MalformedSession(String),
}

/// Synchronous completion interface: submit a prompt, receive text or a
/// failure within the given timeout.
pub trait CompletionClient: Send + Sync {
    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, CompletionError>;
}

/// Completion client that shells out to an external command, passing the
/// prompt as the final argument and reading the completion from stdout.
#[derive(Debug, Clone)]
pub struct CommandCompletionClient {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandCompletionClient {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl CompletionClient for CommandCompletionClient {
    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, CompletionError> {
        let program = self.program.clone();
        let args = self.args.clone();
        let prompt = prompt.to_string();

        // The command runs on a worker thread so the timeout can be
        // enforced with recv_timeout; a command that outlives the timeout
        // is abandoned, not awaited.
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = Command::new(&program).args(&args).arg(&prompt).output();
            let _ = tx.send(result);
        });

        let output = match rx.recv_timeout(timeout) {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(CompletionError::Unavailable(e.to_string())),
            Err(mpsc::RecvTimeoutError::Timeout) => return Err(CompletionError::Timeout(timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(CompletionError::Unavailable(
                    "completion worker exited without a result".to_string(),
                ))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CompletionError::Unavailable(format!(
                "exit code: {:?}, stderr: {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        if response.trim().is_empty() {
            return Err(CompletionError::MalformedSession(
                "empty response from completion backend".to_string(),
            ));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_client_echoes_prompt() {
        let client = CommandCompletionClient::new("echo", Vec::new());
        let response = client
            .complete("hello backend", Duration::from_secs(5))
            .unwrap();
        assert_eq!(response.trim(), "hello backend");
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let client = CommandCompletionClient::new("/nonexistent/completion-backend", Vec::new());
        let err = client.complete("prompt", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, CompletionError::Unavailable(_)));
    }

    #[test]
    fn test_failing_command_is_unavailable() {
        let client = CommandCompletionClient::new("false", Vec::new());
        let err = client.complete("prompt", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, CompletionError::Unavailable(_)));
    }

    #[test]
    fn test_slow_command_times_out() {
        let client = CommandCompletionClient::new("sh", vec!["-c".to_string(), "sleep 5".to_string()]);
        let err = client
            .complete("ignored", Duration::from_millis(100))
            .unwrap_err();
        assert!(matches!(err, CompletionError::Timeout(_)));
    }

    #[test]
    fn test_empty_output_is_malformed_session() {
        let client = CommandCompletionClient::new("true", Vec::new());
        let err = client.complete("prompt", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, CompletionError::MalformedSession(_)));
    }
}
