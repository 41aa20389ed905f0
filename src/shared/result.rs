/// Result alias for the application edges (configuration loading, CLI wiring).
///
/// The resolution core itself returns `std::result::Result<T, AnalyzerError>`
/// so callers can tell batch-fatal failures from per-file ones.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
