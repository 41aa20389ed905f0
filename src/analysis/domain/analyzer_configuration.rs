use super::{Excludes, PackageConfiguration};
use crate::analysis::policies::PackageManagerPriority;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Free-form options for a single package manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageManagerConfiguration {
    pub options: BTreeMap<String, String>,
}

/// Settings of an analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerConfiguration {
    /// Package manager names in descending priority, used when several
    /// managers claim the same definition file.
    pub package_manager_priority: Vec<String>,
    /// If set, only these package managers take part in the analysis.
    pub enabled_package_managers: Option<Vec<String>>,
    pub package_managers: BTreeMap<String, PackageManagerConfiguration>,
    pub excludes: Excludes,
    pub package_configurations: Vec<PackageConfiguration>,
    pub parallel_jobs: usize,
    pub timeout: Option<Duration>,
}

impl Default for AnalyzerConfiguration {
    fn default() -> Self {
        Self {
            package_manager_priority: Vec::new(),
            enabled_package_managers: None,
            package_managers: BTreeMap::new(),
            excludes: Excludes::default(),
            package_configurations: Vec::new(),
            parallel_jobs: default_parallel_jobs(),
            timeout: None,
        }
    }
}

/// Number of available CPUs, at least 1.
pub fn default_parallel_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl AnalyzerConfiguration {
    /// Options of `package_manager`, looked up case-insensitively.
    pub fn package_manager_options(&self, package_manager: &str) -> Option<&BTreeMap<String, String>> {
        self.package_managers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(package_manager))
            .map(|(_, configuration)| &configuration.options)
    }

    pub fn package_manager_option(&self, package_manager: &str, key: &str) -> Option<&str> {
        self.package_manager_options(package_manager)
            .and_then(|options| options.get(key))
            .map(String::as_str)
    }

    /// Returns a copy with one option of `package_manager` set to `value`.
    pub fn with_package_manager_option(
        &self,
        package_manager: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> AnalyzerConfiguration {
        let mut configuration = self.clone();
        let name = configuration
            .package_managers
            .keys()
            .find(|name| name.eq_ignore_ascii_case(package_manager))
            .cloned()
            .unwrap_or_else(|| package_manager.to_string());
        configuration
            .package_managers
            .entry(name)
            .or_default()
            .options
            .insert(key.into(), value.into());
        configuration
    }

    pub fn is_enabled(&self, package_manager: &str) -> bool {
        self.enabled_package_managers.as_ref().map_or(true, |enabled| {
            enabled
                .iter()
                .any(|name| name.eq_ignore_ascii_case(package_manager))
        })
    }

    pub fn priority(&self) -> PackageManagerPriority {
        PackageManagerPriority::new(self.package_manager_priority.clone())
    }

    /// Effective number of concurrent resolutions, at least 1.
    pub fn parallel_jobs(&self) -> usize {
        self.parallel_jobs.max(1)
    }
}
