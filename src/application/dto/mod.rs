/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod analysis_report;
mod analyze_request;

pub use analysis_report::{AnalysisReport, PackageConfigurationMatch};
pub use analyze_request::{AnalyzeRequest, AnalyzeRequestBuilder};
