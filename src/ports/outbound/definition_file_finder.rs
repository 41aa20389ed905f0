use crate::analysis::domain::Excludes;
use crate::shared::AnalyzerError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// DefinitionFileFinder port for locating definition files
///
/// This port abstracts walking the analysis tree. Each package manager
/// name is mapped to the files whose names match one of its globs.
pub trait DefinitionFileFinder: Send + Sync {
    /// Finds definition files below `root`.
    ///
    /// # Arguments
    /// * `root` - Analysis root directory
    /// * `globs` - Package manager name to file name glob patterns
    /// * `excludes` - Paths excluded from the analysis
    ///
    /// # Returns
    /// Absolute paths per package manager, sorted. A file may be claimed by
    /// several package managers.
    ///
    /// # Errors
    /// `Io` if the tree cannot be read, `InvalidConfiguration` for an
    /// invalid glob.
    fn find(
        &self,
        root: &Path,
        globs: &BTreeMap<String, Vec<String>>,
        excludes: &Excludes,
    ) -> Result<BTreeMap<String, Vec<PathBuf>>, AnalyzerError>;
}
