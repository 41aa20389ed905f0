use crate::shared::AnalyzerError;
use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Compiles a glob in which `*` does not cross directory separators and `**`
/// spans any number of directories.
pub(crate) fn compile_glob(pattern: &str) -> Result<GlobMatcher, AnalyzerError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| {
            AnalyzerError::invalid_configuration(format!("invalid glob '{}': {}", pattern, e))
        })
}

/// Why a path is excluded from the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathExcludeReason {
    BuildToolOf,
    DataFileOf,
    DocumentationOf,
    ExampleOf,
    OptionalComponentOf,
    Other,
    ProvidedBy,
    TestOf,
    TestToolOf,
}

/// Why a scope is excluded from the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeExcludeReason {
    BuildDependencyOf,
    DevDependencyOf,
    DocumentationDependencyOf,
    ProvidedDependencyOf,
    TestDependencyOf,
    RuntimeDependencyOf,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPathExclude {
    pattern: String,
    reason: PathExcludeReason,
    #[serde(default)]
    comment: String,
}

/// Excludes every path matching a glob pattern, relative to the analysis root.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawPathExclude")]
pub struct PathExclude {
    pattern: String,
    reason: PathExcludeReason,
    comment: String,
    matcher: GlobMatcher,
}

impl PathExclude {
    pub fn new(
        pattern: impl Into<String>,
        reason: PathExcludeReason,
        comment: impl Into<String>,
    ) -> Result<Self, AnalyzerError> {
        let pattern = pattern.into();
        let matcher = compile_glob(&pattern)?;
        Ok(Self {
            pattern,
            reason,
            comment: comment.into(),
            matcher,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn reason(&self) -> PathExcludeReason {
        self.reason
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        self.matcher.is_match(path.as_ref())
    }
}

impl TryFrom<RawPathExclude> for PathExclude {
    type Error = AnalyzerError;

    fn try_from(raw: RawPathExclude) -> Result<Self, Self::Error> {
        Self::new(raw.pattern, raw.reason, raw.comment)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScopeExclude {
    pattern: String,
    reason: ScopeExcludeReason,
    #[serde(default)]
    comment: String,
}

/// Excludes every scope whose whole name matches a regular expression.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawScopeExclude")]
pub struct ScopeExclude {
    pattern: String,
    reason: ScopeExcludeReason,
    comment: String,
    regex: Regex,
}

impl ScopeExclude {
    pub fn new(
        pattern: impl Into<String>,
        reason: ScopeExcludeReason,
        comment: impl Into<String>,
    ) -> Result<Self, AnalyzerError> {
        let pattern = pattern.into();
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            AnalyzerError::invalid_configuration(format!(
                "invalid scope pattern '{}': {}",
                pattern, e
            ))
        })?;
        Ok(Self {
            pattern,
            reason,
            comment: comment.into(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn reason(&self) -> ScopeExcludeReason {
        self.reason
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn matches(&self, scope_name: &str) -> bool {
        self.regex.is_match(scope_name)
    }
}

impl TryFrom<RawScopeExclude> for ScopeExclude {
    type Error = AnalyzerError;

    fn try_from(raw: RawScopeExclude) -> Result<Self, Self::Error> {
        Self::new(raw.pattern, raw.reason, raw.comment)
    }
}

/// Run-wide path and scope excludes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Excludes {
    pub paths: Vec<PathExclude>,
    pub scopes: Vec<ScopeExclude>,
}

impl Excludes {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.scopes.is_empty()
    }

    /// Whether `relative_path` or any of its ancestor directories is excluded.
    pub fn is_path_excluded(&self, relative_path: impl AsRef<Path>) -> bool {
        if self.paths.is_empty() {
            return false;
        }

        relative_path
            .as_ref()
            .ancestors()
            .filter(|path| !path.as_os_str().is_empty())
            .any(|path| self.paths.iter().any(|exclude| exclude.matches(path)))
    }

    pub fn is_scope_excluded(&self, scope_name: &str) -> bool {
        self.scopes.iter().any(|exclude| exclude.matches(scope_name))
    }
}
