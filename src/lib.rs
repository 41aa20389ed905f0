//! sca-analyzer - Dependency resolution core for software composition analysis
//!
//! This library discovers the definition files of every project below a
//! directory, resolves their dependency graphs through package-manager
//! plugins, and matches the resolved packages against package
//! configurations. It follows hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`analysis`): Identifiers, provenance, projects, results,
//!   package configurations and the matching policies
//! - **Application Layer** (`application`): The analysis orchestrator and the
//!   package configuration matching use case
//! - **Ports** (`ports`): The package manager plugin contract and other
//!   infrastructure interfaces
//! - **Adapters** (`adapters`): Subprocess runner, filesystem discovery,
//!   console progress and the built-in Pip and Pipenv plugins
//! - **Shared** (`shared`): Error types, cancellation and URL helpers
//!
//! # Example
//!
//! ```no_run
//! use sca_analyzer::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let use_case = AnalyzeDependenciesUseCase::new(
//!     PackageManagerRegistry::with_builtin(),
//!     FileSystemDefinitionFileFinder::new(),
//!     Arc::new(TokioCommandRunner::new()),
//!     StderrProgressReporter::new(),
//!     AnalyzerConfiguration::default(),
//! );
//!
//! let request = AnalyzeRequest::builder().analysis_root(".").build()?;
//! let result = use_case.execute(request).await?;
//!
//! for package in result.packages() {
//!     println!("{}", package.id());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod analysis;
pub mod application;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemDefinitionFileFinder, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::package_managers::{Pip, PipFactory, Pipenv, PipenvFactory};
    pub use crate::adapters::outbound::process::{CommandLineTool, TokioCommandRunner};
    pub use crate::analysis::domain::{
        AnalyzerConfiguration, AnalyzerResult, DefinitionFileResult, DependencyNode, Excludes,
        Identifier, Issue, Package, PackageConfiguration, PackageReference, PathExclude,
        PathExcludeReason, Project, ProjectAnalyzerResult, Provenance, Scope, ScopeExclude,
        ScopeExcludeReason, Severity, SourceCodeOrigin, VcsInfo, VcsMatcher, VcsType,
    };
    pub use crate::analysis::policies::{PackageManagerPriority, VersionRange};
    pub use crate::analysis::services::{PackageConfigurationProvider, ProjectCache};
    pub use crate::application::dto::{
        AnalysisReport, AnalyzeRequest, PackageConfigurationMatch,
    };
    pub use crate::application::factories::{
        PackageManagerRegistry, PresenterFactory, PresenterType,
    };
    pub use crate::application::use_cases::{
        AnalysisPhase, AnalyzeDependenciesUseCase, MatchPackageConfigurationsUseCase,
    };
    pub use crate::ports::outbound::{
        CommandRunner, DefinitionFileFinder, Labels, OutputPresenter, PackageManager,
        PackageManagerFactory, ProcessOutput, ProgressReporter, ResolutionContext,
    };
    pub use crate::shared::{
        AnalyzerError, CancellationHandle, CancellationSignal, ExitCode, Result,
    };
}
