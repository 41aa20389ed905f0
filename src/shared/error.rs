use crate::analysis::domain::Issue;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean analysis,
/// an analysis that completed with recorded issues, and outright failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every definition file resolved without issues
    Success = 0,
    /// The analysis completed, but at least one issue was recorded
    IssuesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, file I/O, discovery, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::IssuesDetected => write!(f, "Issues Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors produced by the resolution core.
///
/// Plugin-batch-fatal errors (`ToolUnavailable`, `VersionIncompatible`) stop a
/// single package manager's batch, per-file errors (`ResolutionFailed`,
/// `DelegationFailed`, `Cancelled`) are recorded as issues on that file's
/// result, and `InvalidConfiguration` is raised at construction time.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Required tool '{tool}' is not available\nDetails: {details}\n\n💡 Hint: Install '{tool}' and make sure it is on the PATH")]
    ToolUnavailable { tool: String, details: String },

    #[error("Tool '{tool}' has version {found}, which does not satisfy the required range {required}\n\n💡 Hint: Install a version of '{tool}' within {required}")]
    VersionIncompatible {
        tool: String,
        found: String,
        required: String,
    },

    #[error("Failed to resolve dependencies of {}: {}", definition_file.display(), summarize_issues(issues))]
    ResolutionFailed {
        definition_file: PathBuf,
        issues: Vec<Issue>,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Delegation to package manager '{delegate}' failed: {source}")]
    DelegationFailed {
        delegate: String,
        #[source]
        source: Box<AnalyzerError>,
    },

    #[error("Resolution was cancelled: {reason}")]
    Cancelled { reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalyzerError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        AnalyzerError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Shorthand for a `ResolutionFailed` carrying a single error issue.
    pub fn resolution_failed(
        definition_file: impl Into<PathBuf>,
        source: &str,
        message: impl Into<String>,
    ) -> Self {
        AnalyzerError::ResolutionFailed {
            definition_file: definition_file.into(),
            issues: vec![Issue::error(source, message)],
        }
    }

    /// Whether this error stops the whole batch of a package manager.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(
            self,
            AnalyzerError::ToolUnavailable { .. } | AnalyzerError::VersionIncompatible { .. }
        )
    }

    /// Converts the error into the non-fatal issues recorded on a result.
    ///
    /// `ResolutionFailed` keeps its own issues and `DelegationFailed` is
    /// flattened to the issues of the delegate.
    pub fn into_issues(self, source: &str) -> Vec<Issue> {
        match self {
            AnalyzerError::ResolutionFailed { issues, .. } if !issues.is_empty() => issues,
            AnalyzerError::DelegationFailed { source: inner, .. } => inner.into_issues(source),
            other => vec![Issue::error(source, other.to_string())],
        }
    }
}

fn summarize_issues(issues: &[Issue]) -> String {
    match issues {
        [] => "no details available".to_string(),
        [single] => single.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more issue(s))", first.message, rest.len()),
    }
}
