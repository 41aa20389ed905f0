use crate::analysis::domain::{
    AnalyzerConfiguration, DependencyNode, Identifier, Issue, Package, PackageReference, Project,
    ProjectAnalyzerResult, Provenance, Scope, VcsInfo, VcsType,
};
use crate::ports::outbound::{
    CommandRunner, Labels, PackageManager, PackageManagerFactory, ResolutionContext,
};
use crate::shared::AnalyzerError;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Option replacing the type of the reported project identifier.
pub const OPTION_OVERRIDE_PROJECT_TYPE: &str = "overrideProjectType";
/// Option replacing the definition file path reported for the project.
pub const OPTION_OVERRIDE_PROJECT_DEFINITION_FILE: &str = "overrideProjectDefinitionFile";

const DEFAULT_PROJECT_TYPE: &str = "PIP";
const PACKAGE_TYPE: &str = "PyPI";
const SCOPE_NAME: &str = "install";
const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Pip package manager reading pinned requirements files.
///
/// Requirements are read statically: `name==version` pins, `name @ url`
/// direct references, `-r` includes and local project references
/// (`-e ./lib`) to other requirements files of the same batch.
#[derive(Debug, Clone)]
pub struct Pip {
    analysis_root: PathBuf,
    project_type: String,
    definition_file_override: Option<String>,
}

impl Pip {
    pub const NAME: &'static str = "Pip";

    pub fn new(analysis_root: &Path, configuration: &AnalyzerConfiguration) -> Self {
        Self {
            analysis_root: analysis_root.to_path_buf(),
            project_type: configuration
                .package_manager_option(Self::NAME, OPTION_OVERRIDE_PROJECT_TYPE)
                .unwrap_or(DEFAULT_PROJECT_TYPE)
                .to_string(),
            definition_file_override: configuration
                .package_manager_option(Self::NAME, OPTION_OVERRIDE_PROJECT_DEFINITION_FILE)
                .map(str::to_string),
        }
    }

    fn resolve_project_file<'a>(
        &'a self,
        requirements_file: &'a Path,
        project_path: String,
        index_path: PathBuf,
        context: &'a ResolutionContext,
    ) -> BoxFuture<'a, Result<ProjectAnalyzerResult, AnalyzerError>> {
        async move {
            let id = Identifier::new(self.project_type.as_str(), "", project_path.as_str(), "");
            context
                .resolve_project(id.clone(), &index_path, |nested| async move {
                    self.analyze(requirements_file, id, project_path, &nested)
                        .await
                })
                .await
        }
        .boxed()
    }

    async fn analyze(
        &self,
        requirements_file: &Path,
        id: Identifier,
        project_path: String,
        context: &ResolutionContext,
    ) -> Result<ProjectAnalyzerResult, AnalyzerError> {
        let parsed = read_requirements(requirements_file)?;
        let mut issues = parsed.issues;
        let mut packages = BTreeSet::new();
        let mut dependencies = Vec::new();
        let mut seen = HashSet::new();

        for package in parsed.packages {
            if seen.insert(package.id().clone()) {
                dependencies.push(DependencyNode::Package(PackageReference::new(
                    package.id().clone(),
                )));
                packages.insert(package);
            }
        }

        for directory in parsed.local_projects {
            let target = directory.join(REQUIREMENTS_FILE);
            if !context.definition_files().contains(&target) {
                issues.push(Issue::warning(
                    Self::NAME,
                    format!(
                        "Local project '{}' is not part of the analysis and was skipped",
                        context.relative_path(&directory)
                    ),
                ));
                continue;
            }

            let relative = context.relative_path(&target);
            match self
                .resolve_project_file(&target, relative, target.clone(), context)
                .await
            {
                Ok(result) if seen.insert(result.project().id().clone()) => {
                    dependencies.push(DependencyNode::Project(Arc::clone(result.project())));
                }
                Ok(_) => {}
                Err(e) => issues.extend(e.into_issues(Self::NAME)),
            }
        }

        debug!(
            project = %id,
            packages = packages.len(),
            "resolved requirements"
        );

        let project =
            Project::new(id, project_path).with_scope(Scope::new(SCOPE_NAME, dependencies));
        Ok(ProjectAnalyzerResult::new(Arc::new(project), packages).with_issues(issues))
    }
}

#[async_trait]
impl PackageManager for Pip {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn globs_for_definition_files(&self) -> Vec<String> {
        PipFactory.globs_for_definition_files()
    }

    async fn resolve_dependencies(
        &self,
        definition_file: &Path,
        _labels: &Labels,
        context: &ResolutionContext,
    ) -> Result<Vec<ProjectAnalyzerResult>, AnalyzerError> {
        let (project_path, index_path) = match &self.definition_file_override {
            Some(path) => (path.clone(), self.analysis_root.join(path)),
            None => (
                context.relative_path(definition_file),
                definition_file.to_path_buf(),
            ),
        };

        let result = self
            .resolve_project_file(definition_file, project_path, index_path, context)
            .await?;
        Ok(vec![result])
    }
}

/// Registers [`Pip`] for `requirements*.txt` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipFactory;

impl PackageManagerFactory for PipFactory {
    fn type_name(&self) -> &str {
        Pip::NAME
    }

    fn globs_for_definition_files(&self) -> Vec<String> {
        vec!["requirements*.txt".to_string()]
    }

    fn create(
        &self,
        analysis_root: &Path,
        configuration: &AnalyzerConfiguration,
        _command_runner: Arc<dyn CommandRunner>,
    ) -> Arc<dyn PackageManager> {
        Arc::new(Pip::new(analysis_root, configuration))
    }
}

#[derive(Debug, Default)]
struct ParsedRequirements {
    packages: Vec<Package>,
    local_projects: Vec<PathBuf>,
    issues: Vec<Issue>,
}

#[derive(Debug, PartialEq)]
enum Line {
    Include(String),
    LocalProject(String),
    Requirement {
        name: String,
        version: String,
        provenance: Provenance,
    },
    Unpinned(String),
    Unsupported(String),
}

fn read_requirements(file: &Path) -> Result<ParsedRequirements, AnalyzerError> {
    let mut parsed = ParsedRequirements::default();
    let mut visited = HashSet::new();
    read_requirements_into(file, file, &mut visited, &mut parsed)?;
    Ok(parsed)
}

fn read_requirements_into(
    root_file: &Path,
    file: &Path,
    visited: &mut HashSet<PathBuf>,
    parsed: &mut ParsedRequirements,
) -> Result<(), AnalyzerError> {
    let file = normalize(file);
    if !visited.insert(file.clone()) {
        return Ok(());
    }

    let content = fs::read_to_string(&file).map_err(|e| {
        let message = if file.as_path() == root_file {
            format!("Failed to read '{}': {}", file.display(), e)
        } else {
            format!("Included requirements file '{}' cannot be read: {}", file.display(), e)
        };
        AnalyzerError::resolution_failed(root_file, Pip::NAME, message)
    })?;
    let directory = file.parent().unwrap_or(Path::new("")).to_path_buf();

    for line in logical_lines(&content) {
        match parse_line(&line) {
            Some(Line::Include(include)) => {
                read_requirements_into(root_file, &directory.join(include), visited, parsed)?;
            }
            Some(Line::LocalProject(path)) => {
                parsed.local_projects.push(normalize(&directory.join(path)));
            }
            Some(Line::Requirement {
                name,
                version,
                provenance,
            }) => {
                parsed.packages.push(Package::new(
                    Identifier::new(PACKAGE_TYPE, "", name, version),
                    provenance,
                ));
            }
            Some(Line::Unpinned(name)) => {
                parsed.issues.push(Issue::warning(
                    Pip::NAME,
                    format!(
                        "Requirement '{}' in '{}' is not pinned to a version",
                        line,
                        file.display()
                    ),
                ));
                parsed.packages.push(Package::new(
                    Identifier::new(PACKAGE_TYPE, "", name, ""),
                    Provenance::Unknown,
                ));
            }
            Some(Line::Unsupported(requirement)) => {
                parsed.issues.push(Issue::warning(
                    Pip::NAME,
                    format!(
                        "Requirement '{}' in '{}' cannot be resolved and was skipped",
                        requirement,
                        file.display()
                    ),
                ));
            }
            None => {}
        }
    }

    Ok(())
}

/// Joins continuation lines and strips comments and blank lines.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for raw in content.lines() {
        let without_comment = strip_comment(raw);

        if let Some(continued) = without_comment.trim_end().strip_suffix('\\') {
            current.push_str(continued);
            current.push(' ');
            continue;
        }

        current.push_str(without_comment);
        let line = current.trim().to_string();
        current.clear();
        if !line.is_empty() {
            lines.push(line);
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        lines.push(rest.to_string());
    }

    lines
}

/// Value of `-x value`, `--long value` or `--long=value`.
fn option_value<'a>(line: &'a str, short: &str, long: &str) -> Option<&'a str> {
    [short, long].into_iter().find_map(|flag| {
        let rest = line.strip_prefix(flag)?;
        let value = rest
            .strip_prefix('=')
            .or_else(|| rest.starts_with(char::is_whitespace).then_some(rest))?
            .trim();
        (!value.is_empty()).then_some(value)
    })
}

fn is_local_path(value: &str) -> bool {
    value.starts_with("./") || value.starts_with("../") || value == "." || value.starts_with('/')
}

/// A `#` starts a comment at the beginning of a line or after whitespace.
fn strip_comment(raw: &str) -> &str {
    let mut previous: Option<char> = None;
    for (index, c) in raw.char_indices() {
        if c == '#' && previous.is_none_or(char::is_whitespace) {
            return &raw[..index];
        }
        previous = Some(c);
    }
    raw
}

fn parse_line(line: &str) -> Option<Line> {
    if let Some(include) = option_value(line, "-r", "--requirement") {
        return Some(Line::Include(include.to_string()));
    }

    if let Some(editable) = option_value(line, "-e", "--editable") {
        return Some(editable_requirement(editable));
    }

    if line.starts_with('-') {
        return None;
    }

    if is_local_path(line) {
        return Some(Line::LocalProject(line.to_string()));
    }

    // Drop environment markers and per-requirement options such as hashes.
    let line = line.split(';').next().unwrap_or(line);
    let line = line.split(" --").next().unwrap_or(line).trim();

    if let Some((name, url)) = line.split_once(" @ ") {
        let name = strip_extras(name);
        let url = url.trim();
        return Some(direct_reference(name, url));
    }

    for operator in ["===", "=="] {
        if let Some((name, version)) = line.split_once(operator) {
            let version = version.trim();
            if !version.is_empty() && !version.contains(['*', ',']) {
                return Some(Line::Requirement {
                    name: strip_extras(name).to_string(),
                    version: version.to_string(),
                    provenance: Provenance::Unknown,
                });
            }
        }
    }

    let name_end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '[' | ']' | ',')))
        .unwrap_or(line.len());
    let name = strip_extras(&line[..name_end]);
    (!name.is_empty()).then(|| Line::Unpinned(name.to_string()))
}

fn editable_requirement(editable: &str) -> Line {
    if is_local_path(editable) {
        return Line::LocalProject(editable.to_string());
    }

    let egg = editable
        .split_once('#')
        .and_then(|(_, fragment)| fragment.split('&').find_map(|p| p.strip_prefix("egg=")))
        .map(strip_extras)
        .filter(|name| !name.is_empty());

    match egg {
        Some(name) if editable.starts_with("git+") => direct_reference(name, editable),
        _ => Line::Unsupported(editable.to_string()),
    }
}

fn strip_extras(name: &str) -> &str {
    name.split('[').next().unwrap_or(name).trim()
}

fn direct_reference(name: &str, url: &str) -> Line {
    let url = url.split('#').next().unwrap_or(url);

    if let Some(vcs_url) = url.strip_prefix("git+") {
        let (repository, revision) = split_vcs_revision(vcs_url);
        return Line::Requirement {
            name: name.to_string(),
            version: revision.to_string(),
            provenance: Provenance::repository(
                VcsInfo::new(VcsType::Git, repository, revision),
                revision,
            ),
        };
    }

    Line::Requirement {
        name: name.to_string(),
        version: version_from_artifact_url(name, url).unwrap_or_default(),
        provenance: Provenance::artifact(url),
    }
}

/// Splits `https://host/repo.git@v1.0` into repository URL and revision.
fn split_vcs_revision(url: &str) -> (&str, &str) {
    let path_start = url.find("://").map_or(0, |i| i + 3);
    let path_start = url[path_start..]
        .find('/')
        .map_or(url.len(), |i| path_start + i);

    match url[path_start..].rfind('@') {
        Some(index) => (&url[..path_start + index], &url[path_start + index + 1..]),
        None => (url, ""),
    }
}

/// Reads the version from sdist or wheel file names such as
/// `requests-2.31.0.tar.gz` or `requests-2.31.0-py3-none-any.whl`.
fn version_from_artifact_url(name: &str, url: &str) -> Option<String> {
    let file_name = url.rsplit('/').next()?;
    let normalized_name = name.to_lowercase().replace('_', "-");
    let normalized_file = file_name.to_lowercase().replace('_', "-");
    let rest = normalized_file.strip_prefix(&format!("{}-", normalized_name))?;
    let rest = &file_name[file_name.len() - rest.len()..];

    let version = if let Some(stem) = rest.strip_suffix(".whl") {
        stem.split('-').next()?
    } else {
        [".tar.gz", ".tar.bz2", ".zip", ".tgz"]
            .iter()
            .find_map(|suffix| rest.strip_suffix(suffix))?
    };

    (!version.is_empty()).then(|| version.to_string())
}

/// Lexically resolves `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::Excludes;
    use crate::analysis::services::ProjectCache;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn context(root: &Path, files: Vec<PathBuf>) -> ResolutionContext {
        ResolutionContext::new(
            root,
            files,
            Arc::new(ProjectCache::new()),
            Arc::new(Excludes::default()),
        )
    }

    #[test]
    fn test_parse_pinned_requirement() {
        assert_eq!(
            parse_line("requests[socks]==2.31.0 ; python_version >= '3.8'"),
            Some(Line::Requirement {
                name: "requests".to_string(),
                version: "2.31.0".to_string(),
                provenance: Provenance::Unknown,
            })
        );
    }

    #[test]
    fn test_parse_unpinned_requirement() {
        assert_eq!(parse_line("flask>=2.0"), Some(Line::Unpinned("flask".to_string())));
        assert_eq!(parse_line("six"), Some(Line::Unpinned("six".to_string())));
        assert_eq!(
            parse_line("django==4.*"),
            Some(Line::Unpinned("django".to_string()))
        );
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(parse_line("-r base.txt"), Some(Line::Include("base.txt".to_string())));
        assert_eq!(
            parse_line("--requirement=common/base.txt"),
            Some(Line::Include("common/base.txt".to_string()))
        );
        assert_eq!(parse_line("-e ./lib"), Some(Line::LocalProject("./lib".to_string())));
        assert_eq!(parse_line("--index-url https://pypi.org/simple"), None);
        assert_eq!(
            parse_line("-e hg+https://host/x#egg=x"),
            Some(Line::Unsupported("hg+https://host/x#egg=x".to_string()))
        );
        assert_eq!(
            parse_line("-e git+https://host/x.git"),
            Some(Line::Unsupported("git+https://host/x.git".to_string()))
        );
    }

    #[test]
    fn test_parse_editable_git_reference() {
        match parse_line("-e git+https://host/lib.git@abc123#egg=lib[extra]&subdirectory=src") {
            Some(Line::Requirement {
                name,
                version,
                provenance: Provenance::Repository(repository),
            }) => {
                assert_eq!(name, "lib");
                assert_eq!(version, "abc123");
                assert_eq!(repository.vcs_info.url, "https://host/lib.git");
                assert_eq!(repository.resolved_revision, "abc123");
            }
            other => panic!("unexpected line: {:?}", other),
        }
    }

    #[test]
    fn test_logical_lines_strip_tab_comments() {
        let lines = logical_lines("requests==2.31.0\t# pinned for CVE\n#top\nsix==1.16.0#not-a-comment\n");
        assert_eq!(lines, vec!["requests==2.31.0", "six==1.16.0#not-a-comment"]);
        match parse_line(&lines[0]) {
            Some(Line::Requirement { version, .. }) => assert_eq!(version, "2.31.0"),
            other => panic!("unexpected line: {:?}", other),
        }
    }

    #[test]
    fn test_parse_git_reference() {
        match parse_line("requests @ git+https://github.com/psf/requests.git@v2.31.0#egg=requests") {
            Some(Line::Requirement {
                name,
                version,
                provenance: Provenance::Repository(repository),
            }) => {
                assert_eq!(name, "requests");
                assert_eq!(version, "v2.31.0");
                assert_eq!(repository.vcs_info.url, "https://github.com/psf/requests.git");
                assert_eq!(repository.resolved_revision, "v2.31.0");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_split_vcs_revision_keeps_user_info() {
        assert_eq!(
            split_vcs_revision("ssh://git@github.com/org/repo.git@main"),
            ("ssh://git@github.com/org/repo.git", "main")
        );
        assert_eq!(
            split_vcs_revision("ssh://git@github.com/org/repo.git"),
            ("ssh://git@github.com/org/repo.git", "")
        );
    }

    #[test]
    fn test_parse_artifact_reference() {
        assert_eq!(
            parse_line("my_lib @ https://files.example.org/My_Lib-1.2.3.tar.gz"),
            Some(Line::Requirement {
                name: "my_lib".to_string(),
                version: "1.2.3".to_string(),
                provenance: Provenance::artifact("https://files.example.org/My_Lib-1.2.3.tar.gz"),
            })
        );
        assert_eq!(
            version_from_artifact_url("wheel", "https://x/wheel-0.41.2-py3-none-any.whl"),
            Some("0.41.2".to_string())
        );
    }

    #[test]
    fn test_logical_lines() {
        let content = "# comment\nrequests==2.31.0 \\\n    --hash=sha256:abc\n\nsix==1.16.0  # inline\n";
        let lines = logical_lines(content);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("requests==2.31.0"));
        assert!(lines[0].ends_with("--hash=sha256:abc"));
        assert_eq!(lines[1], "six==1.16.0");
    }

    #[tokio::test]
    async fn test_resolve_requirements_with_include() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/base.txt", "six==1.16.0\n");
        let file = write(
            dir.path(),
            "app/requirements.txt",
            "-r base.txt\nrequests==2.31.0\nflask\nsix==1.16.0\n",
        );

        let pip = Pip::new(dir.path(), &AnalyzerConfiguration::default());
        let results = pip
            .resolve_dependencies(&file, &Labels::new(), &context(dir.path(), vec![file.clone()]))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.project().id().to_string(), "PIP::app/requirements.txt:");
        assert_eq!(result.project().definition_file_path(), "app/requirements.txt");

        let ids: Vec<String> = result.packages().iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, vec!["PyPI::flask:", "PyPI::requests:2.31.0", "PyPI::six:1.16.0"]);
        assert_eq!(result.project().scope("install").unwrap().dependencies.len(), 3);
        assert_eq!(result.issues().len(), 1);
        assert!(!result.issues()[0].is_error());
    }

    #[tokio::test]
    async fn test_resolve_requirements_with_editable_references() {
        let dir = TempDir::new().unwrap();
        let file = write(
            dir.path(),
            "requirements.txt",
            "-e git+https://github.com/org/lib.git@abc123#egg=lib\n\
             -e svn+https://host/repo#egg=legacy\n\
             six==1.16.0\n",
        );

        let pip = Pip::new(dir.path(), &AnalyzerConfiguration::default());
        let results = pip
            .resolve_dependencies(&file, &Labels::new(), &context(dir.path(), vec![file.clone()]))
            .await
            .unwrap();

        let result = &results[0];
        let ids: Vec<String> = result.packages().iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, vec!["PyPI::lib:abc123", "PyPI::six:1.16.0"]);

        let lib = result.packages().iter().next().unwrap();
        assert!(matches!(lib.provenance(), Provenance::Repository(_)));

        assert_eq!(result.issues().len(), 1);
        assert!(!result.issues()[0].is_error());
        assert!(result.issues()[0].message.contains("svn+https://host/repo#egg=legacy"));
    }

    #[tokio::test]
    async fn test_missing_include_fails_resolution() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "requirements.txt", "-r missing.txt\n");

        let pip = Pip::new(dir.path(), &AnalyzerConfiguration::default());
        let result = pip
            .resolve_dependencies(&file, &Labels::new(), &context(dir.path(), vec![file.clone()]))
            .await;

        match result {
            Err(AnalyzerError::ResolutionFailed { definition_file, issues }) => {
                assert_eq!(definition_file, file);
                assert!(issues[0].message.contains("missing.txt"));
            }
            other => panic!("unexpected: {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_overrides_change_reported_project() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "svc/requirements-from-pipenv.txt", "six==1.16.0\n");
        let configuration = AnalyzerConfiguration::default()
            .with_package_manager_option(Pip::NAME, OPTION_OVERRIDE_PROJECT_TYPE, "Pipenv")
            .with_package_manager_option(
                Pip::NAME,
                OPTION_OVERRIDE_PROJECT_DEFINITION_FILE,
                "svc/Pipfile.lock",
            );

        let pip = Pip::new(dir.path(), &configuration);
        let context = context(dir.path(), vec![]);
        let results = pip
            .resolve_dependencies(&file, &Labels::new(), &context)
            .await
            .unwrap();

        let project = results[0].project();
        assert_eq!(project.id().to_string(), "Pipenv::svc/Pipfile.lock:");
        assert_eq!(project.definition_file_path(), "svc/Pipfile.lock");
        assert!(context
            .project_cache()
            .get_by_definition_file(&dir.path().join("svc/Pipfile.lock"))
            .is_some());
    }

    #[tokio::test]
    async fn test_local_project_reference_shares_cached_node() {
        let dir = TempDir::new().unwrap();
        let app = write(dir.path(), "app/requirements.txt", "-e ../lib\nrequests==2.31.0\n");
        let lib = write(dir.path(), "lib/requirements.txt", "six==1.16.0\n");
        let context = context(dir.path(), vec![app.clone(), lib.clone()]);
        let pip = Pip::new(dir.path(), &AnalyzerConfiguration::default());

        let app_results = pip
            .resolve_dependencies(&app, &Labels::new(), &context)
            .await
            .unwrap();
        let lib_results = pip
            .resolve_dependencies(&lib, &Labels::new(), &context)
            .await
            .unwrap();

        let reference = app_results[0]
            .project()
            .scope("install")
            .unwrap()
            .dependencies
            .iter()
            .find_map(|node| node.as_project())
            .cloned()
            .unwrap();
        assert!(Arc::ptr_eq(&reference, lib_results[0].project()));
        assert_eq!(context.project_cache().resolution_count(), 2);
    }

    #[tokio::test]
    async fn test_local_project_outside_batch_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let app = write(dir.path(), "app/requirements.txt", "-e ../vendor/lib\n");

        let pip = Pip::new(dir.path(), &AnalyzerConfiguration::default());
        let results = pip
            .resolve_dependencies(&app, &Labels::new(), &context(dir.path(), vec![app.clone()]))
            .await
            .unwrap();

        assert_eq!(results[0].issues().len(), 1);
        assert!(results[0].issues()[0].message.contains("vendor/lib"));
    }
}
