use crate::ports::outbound::{CommandRunner, ProcessOutput};
use crate::shared::AnalyzerError;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// TokioCommandRunner adapter spawning real processes
///
/// Processes are spawned with `kill_on_drop`, so dropping the future of a
/// cancelled resolution terminates the external tool as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        working_dir: &Path,
        command: &str,
        args: &[String],
    ) -> Result<ProcessOutput, AnalyzerError> {
        debug!(command, ?args, working_dir = %working_dir.display(), "running command");

        // Spawning in a missing directory also fails with `NotFound`.
        if !working_dir.is_dir() {
            return Err(AnalyzerError::Io {
                path: working_dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "working directory does not exist"),
            });
        }

        let output = Command::new(command)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => AnalyzerError::ToolUnavailable {
                    tool: command.to_string(),
                    details: e.to_string(),
                },
                _ => AnalyzerError::Io {
                    path: working_dir.to_path_buf(),
                    source: e,
                },
            })?;

        let result = ProcessOutput::new(
            working_dir,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        debug!(command, exit_code = ?result.exit_code, "command finished");

        Ok(result)
    }
}
