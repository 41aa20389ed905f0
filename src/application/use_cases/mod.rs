/// Use cases module containing application business logic orchestration
mod analyze_dependencies;
mod match_package_configurations;

pub use analyze_dependencies::{AnalysisPhase, AnalyzeDependenciesUseCase};
pub use match_package_configurations::MatchPackageConfigurationsUseCase;
