/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, processes, console, etc.).
pub mod command_runner;
pub mod definition_file_finder;
pub mod output_presenter;
pub mod package_manager;
pub mod progress_reporter;

pub use command_runner::{CommandRunner, ProcessOutput};
pub use definition_file_finder::DefinitionFileFinder;
pub use output_presenter::OutputPresenter;
pub use package_manager::{
    relative_path, Labels, PackageManager, PackageManagerFactory, ResolutionContext,
};
pub use progress_reporter::ProgressReporter;
