use super::{Excludes, Issue, Package, Project, Scope};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// A resolved project together with the packages its scopes reference.
///
/// The project node is shared: the same `Arc` is handed out for every
/// reference to the project within a batch. `excluded_scopes` is specific to
/// the definition file this result is reported for.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectAnalyzerResult {
    project: Arc<Project>,
    packages: BTreeSet<Package>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<Issue>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    excluded_scopes: BTreeSet<String>,
}

impl ProjectAnalyzerResult {
    pub fn new(project: Arc<Project>, packages: BTreeSet<Package>) -> Self {
        Self {
            project,
            packages,
            issues: Vec::new(),
            excluded_scopes: BTreeSet::new(),
        }
    }

    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues.extend(issues);
        self
    }

    /// Recomputes the excluded scopes of the shared project node.
    pub fn with_scope_excludes(mut self, excludes: &Excludes) -> Self {
        self.excluded_scopes = self
            .project
            .scopes()
            .iter()
            .filter(|scope| excludes.is_scope_excluded(&scope.name))
            .map(|scope| scope.name.clone())
            .collect();
        self
    }

    pub fn project(&self) -> &Arc<Project> {
        &self.project
    }

    pub fn packages(&self) -> &BTreeSet<Package> {
        &self.packages
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn excluded_scopes(&self) -> &BTreeSet<String> {
        &self.excluded_scopes
    }

    pub fn included_scopes(&self) -> impl Iterator<Item = &Scope> {
        self.project
            .scopes()
            .iter()
            .filter(|scope| !self.excluded_scopes.contains(&scope.name))
    }
}

/// Everything reported for one definition file.
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionFileResult {
    pub package_manager: String,
    pub project_results: Vec<ProjectAnalyzerResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl DefinitionFileResult {
    pub fn new(package_manager: impl Into<String>, project_results: Vec<ProjectAnalyzerResult>) -> Self {
        Self {
            package_manager: package_manager.into(),
            project_results,
            issues: Vec::new(),
        }
    }

    pub fn failed(package_manager: impl Into<String>, issues: Vec<Issue>) -> Self {
        Self {
            package_manager: package_manager.into(),
            project_results: Vec::new(),
            issues,
        }
    }

    /// True if neither the file nor any of its projects carries an error.
    pub fn is_success(&self) -> bool {
        self.all_issues().all(|issue| !issue.is_error())
    }

    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .chain(self.project_results.iter().flat_map(|r| r.issues().iter()))
    }
}

/// Run-wide aggregation of all definition file results.
///
/// `projects` is keyed by definition file path relative to the analysis root,
/// `issues` by package manager name for problems not tied to a single file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyzerResult {
    pub projects: BTreeMap<String, DefinitionFileResult>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub issues: BTreeMap<String, Vec<Issue>>,
}

impl AnalyzerResult {
    pub fn add_issue(&mut self, package_manager: &str, issue: Issue) {
        self.issues
            .entry(package_manager.to_string())
            .or_default()
            .push(issue);
    }

    /// All unique packages across definition files.
    ///
    /// Identifiers are ecosystem-scoped, so equal coordinates from different
    /// package types are reported separately.
    pub fn packages(&self) -> BTreeSet<&Package> {
        self.projects
            .values()
            .flat_map(|file| file.project_results.iter())
            .flat_map(|result| result.packages().iter())
            .collect()
    }

    pub fn project_results(&self) -> impl Iterator<Item = &ProjectAnalyzerResult> {
        self.projects
            .values()
            .flat_map(|file| file.project_results.iter())
    }

    pub fn has_issues(&self) -> bool {
        self.issues.values().any(|issues| !issues.is_empty())
            || self
                .projects
                .values()
                .any(|file| file.all_issues().next().is_some())
    }

    pub fn failed_definition_files(&self) -> Vec<&str> {
        self.projects
            .iter()
            .filter(|(_, file)| !file.is_success())
            .map(|(path, _)| path.as_str())
            .collect()
    }
}
