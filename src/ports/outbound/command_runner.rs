use crate::analysis::domain::Issue;
use crate::shared::AnalyzerError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Captured result of an external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub working_dir: PathBuf,
    /// `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(
        working_dir: impl Into<PathBuf>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Returns the output if the process exited with 0.
    ///
    /// # Errors
    /// `ResolutionFailed` carrying the exit status and standard error.
    pub fn require_success(self, command: &str) -> Result<Self, AnalyzerError> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self
            .exit_code
            .map_or_else(|| "a signal".to_string(), |code| format!("exit code {}", code));
        Err(AnalyzerError::ResolutionFailed {
            definition_file: self.working_dir.clone(),
            issues: vec![Issue::error(
                command,
                format!(
                    "'{}' terminated with {}: {}",
                    command,
                    status,
                    self.stderr.trim()
                ),
            )],
        })
    }
}

/// CommandRunner port for invoking external tools
///
/// Implementations must be `Send + Sync`; resolutions of a batch share one
/// runner. Dropping the returned future must terminate the process.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `command` with `args` in `working_dir` and captures its output.
    ///
    /// # Errors
    /// `ToolUnavailable` if the executable cannot be found, `Io` for other
    /// spawn failures. A non-zero exit status is not an error here.
    async fn run(
        &self,
        working_dir: &Path,
        command: &str,
        args: &[String],
    ) -> Result<ProcessOutput, AnalyzerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_success_passes_output_through() {
        let output = ProcessOutput::new("/work", Some(0), "ok", "");
        assert_eq!(output.clone().require_success("pipenv").unwrap(), output);
    }

    #[test]
    fn test_require_success_reports_status_and_stderr() {
        let output = ProcessOutput::new("/work", Some(2), "", "lock failed\n");
        match output.require_success("pipenv") {
            Err(AnalyzerError::ResolutionFailed { definition_file, issues }) => {
                assert_eq!(definition_file, PathBuf::from("/work"));
                assert!(issues[0].message.contains("exit code 2"));
                assert!(issues[0].message.contains("lock failed"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_signal_termination_is_failure() {
        let output = ProcessOutput::new("/work", None, "", "");
        assert!(!output.is_success());
        assert!(output.require_success("pipenv").is_err());
    }
}
