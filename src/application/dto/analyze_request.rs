use crate::ports::outbound::Labels;
use crate::shared::{AnalyzerError, CancellationSignal};
use std::path::PathBuf;

/// AnalyzeRequest - Request DTO for the dependency analysis use case
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// Root directory of the source tree to analyze
    pub analysis_root: PathBuf,
    /// Labels passed through to every package manager
    pub labels: Labels,
    /// Run-level cancellation; `None` means the run can only time out
    pub cancellation: Option<CancellationSignal>,
}

impl AnalyzeRequest {
    pub fn new(analysis_root: PathBuf) -> Self {
        Self {
            analysis_root,
            labels: Labels::new(),
            cancellation: None,
        }
    }

    pub fn builder() -> AnalyzeRequestBuilder {
        AnalyzeRequestBuilder::default()
    }
}

/// Builder for [`AnalyzeRequest`].
#[derive(Debug, Default)]
pub struct AnalyzeRequestBuilder {
    analysis_root: Option<PathBuf>,
    labels: Labels,
    cancellation: Option<CancellationSignal>,
}

impl AnalyzeRequestBuilder {
    pub fn analysis_root(mut self, analysis_root: impl Into<PathBuf>) -> Self {
        self.analysis_root = Some(analysis_root.into());
        self
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels.extend(labels);
        self
    }

    pub fn cancellation(mut self, signal: CancellationSignal) -> Self {
        self.cancellation = Some(signal);
        self
    }

    pub fn build(self) -> Result<AnalyzeRequest, AnalyzerError> {
        let analysis_root = self
            .analysis_root
            .ok_or_else(|| AnalyzerError::invalid_configuration("an analysis root is required"))?;

        Ok(AnalyzeRequest {
            analysis_root,
            labels: self.labels,
            cancellation: self.cancellation,
        })
    }
}
