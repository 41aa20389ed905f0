use crate::analysis::domain::{
    Identifier, LicenseFindingCuration, PackageConfiguration, PathExclude, Provenance,
};

/// Looks up the package configurations that apply to a resolved package.
///
/// Matching is pure, so a provider can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct PackageConfigurationProvider {
    configurations: Vec<PackageConfiguration>,
}

impl PackageConfigurationProvider {
    pub fn new(configurations: Vec<PackageConfiguration>) -> Self {
        Self { configurations }
    }

    pub fn configurations(&self) -> &[PackageConfiguration] {
        &self.configurations
    }

    /// All applicable configurations, in declaration order.
    pub fn get_package_configurations(
        &self,
        id: &Identifier,
        provenance: &Provenance,
    ) -> Vec<&PackageConfiguration> {
        self.configurations
            .iter()
            .filter(|configuration| configuration.matches(id, provenance))
            .collect()
    }

    /// Indices of all applicable configurations, in declaration order.
    pub fn matching_indices(&self, id: &Identifier, provenance: &Provenance) -> Vec<usize> {
        self.configurations
            .iter()
            .enumerate()
            .filter(|(_, configuration)| configuration.matches(id, provenance))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn path_excludes_for(&self, id: &Identifier, provenance: &Provenance) -> Vec<&PathExclude> {
        self.get_package_configurations(id, provenance)
            .into_iter()
            .flat_map(|configuration| configuration.path_excludes())
            .collect()
    }

    pub fn license_finding_curations_for(
        &self,
        id: &Identifier,
        provenance: &Provenance,
    ) -> Vec<&LicenseFindingCuration> {
        self.get_package_configurations(id, provenance)
            .into_iter()
            .flat_map(|configuration| configuration.license_finding_curations())
            .collect()
    }
}
