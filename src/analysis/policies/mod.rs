pub mod package_manager_priority;
pub mod version_range;

pub use package_manager_priority::PackageManagerPriority;
pub use version_range::{compare_versions, is_applicable_ivy_version, VersionRange};
