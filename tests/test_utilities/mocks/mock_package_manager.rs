use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use sca_analyzer::prelude::*;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const MANIFEST: &str = "deps.toml";

/// `deps.toml` manifest read by [`TomlManifestManager`].
///
/// ```toml
/// name = "app"
/// projects = ["../lib"]
/// delay_ms = 0
///
/// [dependencies]
/// requests = "2.31.0"
/// ```
#[derive(Debug, Deserialize)]
struct Manifest {
    name: String,
    #[serde(default)]
    projects: Vec<String>,
    #[serde(default)]
    delay_ms: u64,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
}

/// Mock PackageManager resolving TOML manifests with local project references
#[derive(Default)]
pub struct TomlManifestManager {
    pub resolutions: AtomicUsize,
    pub after_resolution_calls: AtomicUsize,
    pub labels: Mutex<Vec<Labels>>,
}

impl TomlManifestManager {
    pub const NAME: &'static str = "Toml";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution_count(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }

    fn resolve_manifest<'a>(
        &'a self,
        manifest_file: PathBuf,
        context: &'a ResolutionContext,
    ) -> BoxFuture<'a, std::result::Result<ProjectAnalyzerResult, AnalyzerError>> {
        async move {
            let id = Identifier::new(Self::NAME, "", context.relative_path(&manifest_file), "");
            let index_path = manifest_file.clone();
            context
                .resolve_project(id.clone(), &index_path, |nested| async move {
                    self.analyze(&manifest_file, id, &nested).await
                })
                .await
        }
        .boxed()
    }

    async fn analyze(
        &self,
        manifest_file: &Path,
        id: Identifier,
        context: &ResolutionContext,
    ) -> std::result::Result<ProjectAnalyzerResult, AnalyzerError> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);

        let content = std::fs::read_to_string(manifest_file).map_err(|source| AnalyzerError::Io {
            path: manifest_file.to_path_buf(),
            source,
        })?;
        let manifest: Manifest = toml::from_str(&content).map_err(|e| {
            AnalyzerError::resolution_failed(manifest_file, Self::NAME, e.to_string())
        })?;

        if manifest.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(manifest.delay_ms)).await;
        }

        let mut packages = BTreeSet::new();
        let mut dependencies = Vec::new();
        for (name, version) in &manifest.dependencies {
            let package_id = Identifier::new("Mock", "", name.as_str(), version.as_str());
            dependencies.push(DependencyNode::Package(PackageReference::new(package_id.clone())));
            packages.insert(Package::new(
                package_id,
                Provenance::artifact(format!("https://repo.example.org/{}-{}.tar.gz", name, version)),
            ));
        }

        let directory = manifest_file.parent().unwrap_or(context.analysis_root());
        for project in &manifest.projects {
            let target = normalize(&directory.join(project).join(MANIFEST));
            let result = self.resolve_manifest(target, context).await?;
            packages.extend(result.packages().iter().cloned());
            dependencies.push(DependencyNode::Project(result.project().clone()));
        }

        let project = Project::new(id, context.relative_path(manifest_file))
            .with_homepage_url(format!("https://example.org/{}", manifest.name))
            .with_scope(Scope::new("main", dependencies))
            .with_scope(Scope::new("test", Vec::new()));
        Ok(ProjectAnalyzerResult::new(Arc::new(project), packages))
    }
}

/// Lexically removes `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[async_trait]
impl PackageManager for TomlManifestManager {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn globs_for_definition_files(&self) -> Vec<String> {
        vec![MANIFEST.to_string()]
    }

    async fn resolve_dependencies(
        &self,
        definition_file: &Path,
        labels: &Labels,
        context: &ResolutionContext,
    ) -> std::result::Result<Vec<ProjectAnalyzerResult>, AnalyzerError> {
        self.labels.lock().unwrap().push(labels.clone());
        let result = self
            .resolve_manifest(definition_file.to_path_buf(), context)
            .await?;
        Ok(vec![result])
    }

    async fn after_resolution(&self, _definition_files: &[PathBuf]) {
        self.after_resolution_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Factory handing out one shared [`TomlManifestManager`]
#[derive(Clone)]
pub struct TomlManifestFactory(pub Arc<TomlManifestManager>);

impl PackageManagerFactory for TomlManifestFactory {
    fn type_name(&self) -> &str {
        TomlManifestManager::NAME
    }

    fn globs_for_definition_files(&self) -> Vec<String> {
        vec![MANIFEST.to_string()]
    }

    fn create(
        &self,
        _analysis_root: &Path,
        _configuration: &AnalyzerConfiguration,
        _command_runner: Arc<dyn CommandRunner>,
    ) -> Arc<dyn PackageManager> {
        self.0.clone()
    }
}
