use crate::analysis::domain::{AnalyzerResult, Identifier, Provenance};
use serde::Serialize;

/// Package configurations applying to one resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageConfigurationMatch {
    pub id: Identifier,
    pub provenance: Provenance,
    /// Indices into the configured package configurations, ascending.
    pub configurations: Vec<usize>,
}

/// AnalysisReport - Document written by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analyzer: AnalyzerResult,
    pub package_configuration_matches: Vec<PackageConfigurationMatch>,
}

impl AnalysisReport {
    pub fn new(
        analyzer: AnalyzerResult,
        package_configuration_matches: Vec<PackageConfigurationMatch>,
    ) -> Self {
        Self {
            analyzer,
            package_configuration_matches,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
