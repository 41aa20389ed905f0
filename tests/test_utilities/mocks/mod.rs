/// Mock implementations for testing
mod mock_command_runner;
mod mock_package_manager;
mod mock_progress_reporter;

pub use mock_command_runner::MockCommandRunner;
pub use mock_package_manager::{TomlManifestFactory, TomlManifestManager};
pub use mock_progress_reporter::MockProgressReporter;
