mod package_configuration_provider;
mod project_cache;

pub use package_configuration_provider::PackageConfigurationProvider;
pub use project_cache::ProjectCache;
