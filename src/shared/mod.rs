pub mod cancellation;
pub mod credentials;
pub mod error;
pub mod result;

pub use cancellation::{CancellationHandle, CancellationSignal};
pub use error::{AnalyzerError, ExitCode};
pub use result::Result;
