use crate::analysis::policies::VersionRange;
use crate::ports::outbound::CommandRunner;
use crate::shared::AnalyzerError;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// An external executable with a supported version range.
///
/// Implementors describe how to invoke the tool and how to read its version;
/// [`CommandLineTool::check_version`] gates a batch on that range.
#[async_trait]
pub trait CommandLineTool: Send + Sync {
    /// Executable name, looked up on the PATH.
    fn command(&self) -> &str;

    fn version_arguments(&self) -> Vec<String> {
        vec!["--version".to_string()]
    }

    /// Extracts the bare version from the output of the version command.
    fn transform_version(&self, output: &str) -> String {
        output.trim().to_string()
    }

    /// Ivy range of supported versions, e.g. `[2018.10.9,)`.
    fn version_requirement(&self) -> &str;

    async fn get_version(
        &self,
        runner: &dyn CommandRunner,
        working_dir: &Path,
    ) -> Result<String, AnalyzerError> {
        let output = runner
            .run(working_dir, self.command(), &self.version_arguments())
            .await?;

        if !output.is_success() {
            return Err(AnalyzerError::ToolUnavailable {
                tool: self.command().to_string(),
                details: format!(
                    "version query exited with {:?}: {}",
                    output.exit_code,
                    output.stderr.trim()
                ),
            });
        }

        Ok(self.transform_version(&output.stdout))
    }

    /// Returns the installed version if it lies within the requirement.
    ///
    /// # Errors
    /// `ToolUnavailable` if the tool cannot be run, `VersionIncompatible` if
    /// its version is outside [`CommandLineTool::version_requirement`].
    async fn check_version(
        &self,
        runner: &dyn CommandRunner,
        working_dir: &Path,
    ) -> Result<String, AnalyzerError> {
        let version = self.get_version(runner, working_dir).await?;
        let requirement = self.version_requirement();

        let satisfied = match VersionRange::parse(requirement) {
            Some(range) => range.contains(&version),
            None => version == requirement,
        };

        if !satisfied {
            return Err(AnalyzerError::VersionIncompatible {
                tool: self.command().to_string(),
                found: version,
                required: requirement.to_string(),
            });
        }

        debug!(tool = self.command(), %version, "tool version accepted");
        Ok(version)
    }
}
