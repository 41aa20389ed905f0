use super::pip::{Pip, OPTION_OVERRIDE_PROJECT_DEFINITION_FILE, OPTION_OVERRIDE_PROJECT_TYPE};
use crate::adapters::outbound::process::CommandLineTool;
use crate::analysis::domain::{AnalyzerConfiguration, ProjectAnalyzerResult};
use crate::analysis::policies::compare_versions;
use crate::ports::outbound::{
    CommandRunner, Labels, PackageManager, PackageManagerFactory, ResolutionContext,
};
use crate::shared::AnalyzerError;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// First version providing `pipenv requirements`.
const REQUIREMENTS_COMMAND_SINCE: &str = "2022.4.8";
const REQUIREMENTS_FILE_PREFIX: &str = "requirements-from-pipenv";

/// The `pipenv` executable.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipenvCommand;

impl CommandLineTool for PipenvCommand {
    fn command(&self) -> &str {
        "pipenv"
    }

    fn transform_version(&self, output: &str) -> String {
        output.trim().trim_start_matches("pipenv, version ").to_string()
    }

    fn version_requirement(&self) -> &str {
        "[2018.10.9,)"
    }
}

/// Pipenv package manager for `Pipfile.lock` files.
///
/// Exports the lock file to a requirements file next to it and delegates to
/// [`Pip`], reporting the project under the Pipenv type and the lock file
/// path. The requirements file is removed before returning.
pub struct Pipenv {
    analysis_root: PathBuf,
    configuration: AnalyzerConfiguration,
    command_runner: Arc<dyn CommandRunner>,
    tool: PipenvCommand,
    version: OnceCell<String>,
}

impl Pipenv {
    pub const NAME: &'static str = "Pipenv";

    pub fn new(
        analysis_root: &Path,
        configuration: &AnalyzerConfiguration,
        command_runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            analysis_root: analysis_root.to_path_buf(),
            configuration: configuration.clone(),
            command_runner,
            tool: PipenvCommand,
            version: OnceCell::new(),
        }
    }

    async fn version(&self) -> Result<&str, AnalyzerError> {
        self.version
            .get_or_try_init(|| {
                self.tool
                    .check_version(self.command_runner.as_ref(), &self.analysis_root)
            })
            .await
            .map(String::as_str)
    }

    fn export_arguments(version: &str) -> Vec<String> {
        if compare_versions(version, REQUIREMENTS_COMMAND_SINCE) == Ordering::Less {
            vec!["lock".to_string(), "--requirements".to_string()]
        } else {
            vec!["requirements".to_string()]
        }
    }

    fn delegate(&self, definition_file: &Path, context: &ResolutionContext) -> Pip {
        let configuration = self
            .configuration
            .with_package_manager_option(Pip::NAME, OPTION_OVERRIDE_PROJECT_TYPE, Self::NAME)
            .with_package_manager_option(
                Pip::NAME,
                OPTION_OVERRIDE_PROJECT_DEFINITION_FILE,
                context.relative_path(definition_file),
            );
        Pip::new(&self.analysis_root, &configuration)
    }
}

#[async_trait]
impl PackageManager for Pipenv {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn globs_for_definition_files(&self) -> Vec<String> {
        PipenvFactory.globs_for_definition_files()
    }

    async fn before_resolution(&self, _definition_files: &[PathBuf]) -> Result<(), AnalyzerError> {
        self.version().await.map(|_| ())
    }

    async fn resolve_dependencies(
        &self,
        definition_file: &Path,
        labels: &Labels,
        context: &ResolutionContext,
    ) -> Result<Vec<ProjectAnalyzerResult>, AnalyzerError> {
        let working_dir = definition_file.parent().unwrap_or(&self.analysis_root);
        let version = self.version().await?;

        let output = self
            .command_runner
            .run(working_dir, self.tool.command(), &Self::export_arguments(version))
            .await?
            .require_success(self.tool.command())?;

        let io_error = |source| AnalyzerError::Io {
            path: working_dir.join(format!("{}.txt", REQUIREMENTS_FILE_PREFIX)),
            source,
        };
        let mut requirements = tempfile::Builder::new()
            .prefix(REQUIREMENTS_FILE_PREFIX)
            .suffix(".txt")
            .rand_bytes(0)
            .tempfile_in(working_dir)
            .map_err(io_error)?;
        requirements
            .write_all(output.stdout.as_bytes())
            .and_then(|_| requirements.flush())
            .map_err(io_error)?;

        debug!(
            definition_file = %definition_file.display(),
            requirements = %requirements.path().display(),
            "delegating to Pip"
        );

        let result = self
            .delegate(definition_file, context)
            .resolve_dependencies(requirements.path(), labels, context)
            .await
            .map_err(|source| AnalyzerError::DelegationFailed {
                delegate: Pip::NAME.to_string(),
                source: Box::new(source),
            });

        if let Err(e) = requirements.close() {
            warn!(error = %e, "failed to remove generated requirements file");
        }

        result
    }
}

/// Registers [`Pipenv`] for `Pipfile.lock` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipenvFactory;

impl PackageManagerFactory for PipenvFactory {
    fn type_name(&self) -> &str {
        Pipenv::NAME
    }

    fn globs_for_definition_files(&self) -> Vec<String> {
        vec!["Pipfile.lock".to_string()]
    }

    fn create(
        &self,
        analysis_root: &Path,
        configuration: &AnalyzerConfiguration,
        command_runner: Arc<dyn CommandRunner>,
    ) -> Arc<dyn PackageManager> {
        Arc::new(Pipenv::new(analysis_root, configuration, command_runner))
    }
}
