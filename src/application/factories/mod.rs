mod package_manager_registry;
mod presenter_factory;

pub use package_manager_registry::PackageManagerRegistry;
pub use presenter_factory::{PresenterFactory, PresenterType};
