use async_trait::async_trait;
use sca_analyzer::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock CommandRunner answering scripted command lines
///
/// Command lines are matched as `command arg1 arg2`. Unscripted commands
/// fail like a missing executable.
#[derive(Default, Clone)]
pub struct MockCommandRunner {
    responses: HashMap<String, (i32, String)>,
    pub calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, command_line: &str, exit_code: i32, stdout: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), (exit_code, stdout.to_string()));
        self
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(
        &self,
        working_dir: &Path,
        command: &str,
        args: &[String],
    ) -> std::result::Result<ProcessOutput, AnalyzerError> {
        let command_line = std::iter::once(command.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls
            .lock()
            .unwrap()
            .push((working_dir.to_path_buf(), command_line.clone()));

        match self.responses.get(&command_line) {
            Some((exit_code, stdout)) => Ok(ProcessOutput::new(
                working_dir,
                Some(*exit_code),
                stdout.as_str(),
                "",
            )),
            None => Err(AnalyzerError::ToolUnavailable {
                tool: command.to_string(),
                details: format!("'{}' is not scripted", command_line),
            }),
        }
    }
}
