mod analyzer_configuration;
mod analyzer_result;
mod excludes;
mod identifier;
mod issue;
mod package;
mod package_configuration;
mod project;
mod provenance;
mod vcs;

pub use analyzer_configuration::{
    default_parallel_jobs, AnalyzerConfiguration, PackageManagerConfiguration,
};
pub use analyzer_result::{AnalyzerResult, DefinitionFileResult, ProjectAnalyzerResult};
pub use excludes::{Excludes, PathExclude, PathExcludeReason, ScopeExclude, ScopeExcludeReason};
pub use identifier::Identifier;
pub use issue::{Issue, Severity};
pub use package::Package;
pub use package_configuration::{
    LicenseFindingCuration, LicenseFindingCurationReason, PackageConfiguration,
    PackageConfigurationBuilder, VcsMatcher,
};
pub use project::{DependencyNode, PackageLinkage, PackageReference, Project, Scope};
pub use provenance::{ArtifactProvenance, Provenance, RepositoryProvenance, SourceCodeOrigin};
pub use vcs::{VcsInfo, VcsType};
