/// Filesystem adapters for discovery and output
mod definition_file_finder;
mod file_writer;

pub use definition_file_finder::FileSystemDefinitionFileFinder;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
