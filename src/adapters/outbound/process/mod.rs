/// Process adapters for invoking external package manager tools
mod command_line_tool;
mod tokio_command_runner;

pub use command_line_tool::CommandLineTool;
pub use tokio_command_runner::TokioCommandRunner;
