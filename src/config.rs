//! Configuration file support for sca-analyzer.
//!
//! Provides YAML-based configuration through `sca-analyzer.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use sca_analyzer::analysis::domain::{
    AnalyzerConfiguration, Excludes, PackageConfiguration, PackageManagerConfiguration,
};
use sca_analyzer::shared::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "sca-analyzer.config.yml";

/// Top-level configuration file schema.
///
/// `excludes` and `package_configurations` are validated while they are
/// deserialized, so a loaded file never carries an invalid glob, regex or
/// package configuration.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub package_manager_priority: Option<Vec<String>>,
    pub enabled_package_managers: Option<Vec<String>>,
    pub package_managers: Option<BTreeMap<String, PackageManagerConfiguration>>,
    pub parallel_jobs: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub excludes: Option<Excludes>,
    pub package_configurations: Option<Vec<PackageConfiguration>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Converts the file into a run configuration, falling back to defaults
    /// for every field the file leaves out.
    pub fn into_configuration(self) -> AnalyzerConfiguration {
        let defaults = AnalyzerConfiguration::default();
        AnalyzerConfiguration {
            package_manager_priority: self.package_manager_priority.unwrap_or_default(),
            enabled_package_managers: self.enabled_package_managers,
            package_managers: self.package_managers.unwrap_or_default(),
            excludes: self.excludes.unwrap_or_default(),
            package_configurations: self.package_configurations.unwrap_or_default(),
            parallel_jobs: self.parallel_jobs.unwrap_or(defaults.parallel_jobs),
            timeout: self.timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML and that every glob, scope pattern and package configuration is well-formed.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.parallel_jobs == Some(0) {
        bail!(
            "Invalid config: parallel_jobs must be at least 1.\n\n\
             💡 Hint: Remove the field to use one job per available CPU."
        );
    }

    if config.timeout_seconds == Some(0) {
        bail!(
            "Invalid config: timeout_seconds must be at least 1.\n\n\
             💡 Hint: Remove the field to run without a timeout."
        );
    }

    let names = [
        ("package_manager_priority", &config.package_manager_priority),
        ("enabled_package_managers", &config.enabled_package_managers),
    ];
    for (field, values) in names {
        for (i, name) in values.iter().flatten().enumerate() {
            if name.trim().is_empty() {
                bail!(
                    "Invalid config: {}[{}] must not be empty.\n\n\
                     💡 Hint: Use package manager names such as \"Pip\" or \"Pipenv\".",
                    field,
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
