use crate::analysis::domain::AnalyzerResult;
use crate::analysis::services::PackageConfigurationProvider;
use crate::application::dto::PackageConfigurationMatch;
use tracing::debug;

/// MatchPackageConfigurationsUseCase - Applies package configurations to resolved packages
///
/// Every unique package of an analysis result is matched against the
/// configured package configurations. Packages without any applicable
/// configuration are left out of the output.
pub struct MatchPackageConfigurationsUseCase {
    provider: PackageConfigurationProvider,
}

impl MatchPackageConfigurationsUseCase {
    pub fn new(provider: PackageConfigurationProvider) -> Self {
        Self { provider }
    }

    /// Matches all packages of `result`, ordered by package identifier.
    pub fn execute(&self, result: &AnalyzerResult) -> Vec<PackageConfigurationMatch> {
        if self.provider.configurations().is_empty() {
            return Vec::new();
        }

        let matches: Vec<_> = result
            .packages()
            .into_iter()
            .filter_map(|package| {
                let configurations = self
                    .provider
                    .matching_indices(package.id(), package.provenance());
                (!configurations.is_empty()).then(|| PackageConfigurationMatch {
                    id: package.id().clone(),
                    provenance: package.provenance().clone(),
                    configurations,
                })
            })
            .collect();

        debug!(
            packages = result.packages().len(),
            matched = matches.len(),
            "matched package configurations"
        );
        matches
    }
}
