use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version control system kind.
///
/// Parsing is case-insensitive and accepts common aliases; unrecognized
/// names are kept verbatim in [`VcsType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VcsType {
    Git,
    GitRepo,
    Mercurial,
    Subversion,
    Other(String),
}

impl VcsType {
    pub fn as_str(&self) -> &str {
        match self {
            VcsType::Git => "Git",
            VcsType::GitRepo => "GitRepo",
            VcsType::Mercurial => "Mercurial",
            VcsType::Subversion => "Subversion",
            VcsType::Other(name) => name,
        }
    }
}

impl FromStr for VcsType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "git" => VcsType::Git,
            "gitrepo" | "git-repo" | "repo" => VcsType::GitRepo,
            "mercurial" | "hg" => VcsType::Mercurial,
            "subversion" | "svn" => VcsType::Subversion,
            _ => VcsType::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for VcsType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(vcs_type) => vcs_type,
            Err(never) => match never {},
        }
    }
}

impl From<VcsType> for String {
    fn from(value: VcsType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where source code is hosted, as declared by package metadata.
///
/// `revision` is the revision that was requested, which may be a branch or
/// tag; the revision actually checked out is tracked by
/// [`RepositoryProvenance`](super::RepositoryProvenance).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VcsInfo {
    #[serde(rename = "type")]
    pub vcs_type: VcsType,
    pub url: String,
    #[serde(default)]
    pub revision: String,
    #[serde(default)]
    pub path: String,
}

impl VcsInfo {
    pub fn new(vcs_type: VcsType, url: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            vcs_type,
            url: url.into(),
            revision: revision.into(),
            path: String::new(),
        }
    }
}
