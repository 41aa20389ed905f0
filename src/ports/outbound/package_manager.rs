use crate::analysis::domain::{AnalyzerConfiguration, Excludes, Identifier, ProjectAnalyzerResult};
use crate::analysis::services::ProjectCache;
use crate::ports::outbound::CommandRunner;
use crate::shared::AnalyzerError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Free-form key/value labels passed through to every resolution.
pub type Labels = BTreeMap<String, String>;

/// Batch-wide state a package manager may consult while resolving one file.
///
/// Cloning is cheap; all batch state is shared. Project resolution must go
/// through [`ResolutionContext::resolve_project`] so that every project is
/// resolved at most once per batch.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    analysis_root: PathBuf,
    definition_files: Arc<[PathBuf]>,
    project_cache: Arc<ProjectCache>,
    excludes: Arc<Excludes>,
    resolving: Option<Identifier>,
}

impl ResolutionContext {
    pub fn new(
        analysis_root: impl Into<PathBuf>,
        definition_files: Vec<PathBuf>,
        project_cache: Arc<ProjectCache>,
        excludes: Arc<Excludes>,
    ) -> Self {
        Self {
            analysis_root: analysis_root.into(),
            definition_files: definition_files.into(),
            project_cache,
            excludes,
            resolving: None,
        }
    }

    pub fn analysis_root(&self) -> &Path {
        &self.analysis_root
    }

    /// All definition files of the current batch.
    pub fn definition_files(&self) -> &[PathBuf] {
        &self.definition_files
    }

    pub fn project_cache(&self) -> &Arc<ProjectCache> {
        &self.project_cache
    }

    pub fn excludes(&self) -> &Excludes {
        &self.excludes
    }

    /// The project whose resolution this context was handed to, if any.
    pub fn resolving(&self) -> Option<&Identifier> {
        self.resolving.as_ref()
    }

    /// `path` relative to the analysis root with `/` separators.
    pub fn relative_path(&self, path: &Path) -> String {
        relative_path(&self.analysis_root, path)
    }

    /// Resolves the project `id` through the batch cache.
    ///
    /// `resolve` receives a context for nested lookups of the projects that
    /// `id` depends on.
    pub async fn resolve_project<F, Fut>(
        &self,
        id: Identifier,
        definition_file: &Path,
        resolve: F,
    ) -> Result<ProjectAnalyzerResult, AnalyzerError>
    where
        F: FnOnce(ResolutionContext) -> Fut,
        Fut: Future<Output = Result<ProjectAnalyzerResult, AnalyzerError>>,
    {
        let nested = ResolutionContext {
            resolving: Some(id.clone()),
            ..self.clone()
        };

        match &self.resolving {
            Some(requester) => {
                self.project_cache
                    .get_or_resolve_nested(requester, id, definition_file, || resolve(nested))
                    .await
            }
            None => {
                self.project_cache
                    .get_or_resolve(id, definition_file, || resolve(nested))
                    .await
            }
        }
    }
}

/// `path` relative to `root` with `/` separators; `path` itself if it lies
/// outside `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// PackageManager port for one package ecosystem
///
/// Implementations keep no state between calls. Within a batch the
/// orchestrator calls `before_resolution` once, `resolve_dependencies` for
/// every file (possibly concurrently) and `after_resolution` once, even if
/// files failed or the run was cancelled.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Name of the package manager, e.g. `Pip`.
    fn name(&self) -> &str;

    /// Glob patterns matched against definition file names during discovery.
    fn globs_for_definition_files(&self) -> Vec<String>;

    /// Validates the environment before any file of the batch is resolved.
    ///
    /// # Errors
    /// `ToolUnavailable` or `VersionIncompatible` fail the whole batch.
    async fn before_resolution(&self, _definition_files: &[PathBuf]) -> Result<(), AnalyzerError> {
        Ok(())
    }

    /// Resolves the dependencies of a single definition file.
    ///
    /// Transient files created on the way must be removed before returning,
    /// also on failure.
    ///
    /// # Arguments
    /// * `definition_file` - Absolute path of the definition file
    /// * `labels` - Labels of the analysis run
    /// * `context` - Batch state, including the project cache
    async fn resolve_dependencies(
        &self,
        definition_file: &Path,
        labels: &Labels,
        context: &ResolutionContext,
    ) -> Result<Vec<ProjectAnalyzerResult>, AnalyzerError>;

    /// Batch-level cleanup.
    async fn after_resolution(&self, _definition_files: &[PathBuf]) {}
}

/// Creates [`PackageManager`] instances for one ecosystem.
pub trait PackageManagerFactory: Send + Sync {
    fn type_name(&self) -> &str;

    fn globs_for_definition_files(&self) -> Vec<String>;

    fn create(
        &self,
        analysis_root: &Path,
        configuration: &AnalyzerConfiguration,
        command_runner: Arc<dyn CommandRunner>,
    ) -> Arc<dyn PackageManager>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::Project;
    use std::collections::BTreeSet;

    fn context(root: &str) -> ResolutionContext {
        ResolutionContext::new(
            root,
            vec![PathBuf::from(root).join("a/requirements.txt")],
            Arc::new(ProjectCache::new()),
            Arc::new(Excludes::default()),
        )
    }

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let context = context("/work/repo");
        assert_eq!(
            context.relative_path(Path::new("/work/repo/a/b/requirements.txt")),
            "a/b/requirements.txt"
        );
        assert_eq!(context.relative_path(Path::new("/work/repo")), "");
    }

    #[tokio::test]
    async fn test_resolve_project_hands_out_nested_context() {
        let context = context("/work/repo");
        let id: Identifier = "Pip::a:".parse().unwrap();
        assert!(context.resolving().is_none());

        let result = context
            .resolve_project(id.clone(), Path::new("/work/repo/a/requirements.txt"), |nested| {
                let id = id.clone();
                async move {
                    assert_eq!(nested.resolving(), Some(&id));
                    assert_eq!(nested.definition_files().len(), 1);
                    Ok(ProjectAnalyzerResult::new(
                        Arc::new(Project::new(id, "a/requirements.txt")),
                        BTreeSet::new(),
                    ))
                }
            })
            .await
            .unwrap();

        assert_eq!(result.project().id(), &id);
        assert!(context.project_cache().contains(&id));
    }
}
