use super::VcsInfo;
use serde::{Deserialize, Serialize};

/// Where the source code of a resolved package actually came from.
///
/// Created once by the package manager that resolved the package and never
/// mutated afterwards. Every consumer matches exhaustively, so adding a
/// variant forces all of them to be revisited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    #[default]
    Unknown,
    Artifact(ArtifactProvenance),
    Repository(RepositoryProvenance),
}

/// Source code obtained from a downloadable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactProvenance {
    pub source_artifact_url: String,
}

/// Source code obtained from a version control checkout.
///
/// `resolved_revision` is the revision that was checked out, as opposed to
/// the possibly symbolic revision requested in `vcs_info`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryProvenance {
    pub vcs_info: VcsInfo,
    pub resolved_revision: String,
}

/// The kind of origin a package configuration can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceCodeOrigin {
    #[serde(rename = "VCS")]
    Vcs,
    #[serde(rename = "ARTIFACT")]
    Artifact,
}

impl Provenance {
    pub fn artifact(source_artifact_url: impl Into<String>) -> Self {
        Provenance::Artifact(ArtifactProvenance {
            source_artifact_url: source_artifact_url.into(),
        })
    }

    pub fn repository(vcs_info: VcsInfo, resolved_revision: impl Into<String>) -> Self {
        Provenance::Repository(RepositoryProvenance {
            vcs_info,
            resolved_revision: resolved_revision.into(),
        })
    }

    /// The origin kind of this provenance, `None` when unknown.
    pub fn source_code_origin(&self) -> Option<SourceCodeOrigin> {
        match self {
            Provenance::Unknown => None,
            Provenance::Artifact(_) => Some(SourceCodeOrigin::Artifact),
            Provenance::Repository(_) => Some(SourceCodeOrigin::Vcs),
        }
    }
}
