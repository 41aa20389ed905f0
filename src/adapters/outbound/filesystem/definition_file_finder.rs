use crate::analysis::domain::Excludes;
use crate::ports::outbound::{relative_path, DefinitionFileFinder};
use crate::shared::AnalyzerError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories that never contain definition files of the analyzed project.
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", "__pycache__", "CVS"];

/// FileSystemDefinitionFileFinder adapter walking the analysis tree
///
/// Hidden directories (including `.git`, `.hg` and `.svn`) and excluded
/// directories are pruned without descending into them. Unreadable
/// subdirectories are skipped with a warning; an unreadable root fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemDefinitionFileFinder;

impl FileSystemDefinitionFileFinder {
    pub fn new() -> Self {
        Self
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, AnalyzerError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            AnalyzerError::invalid_configuration(format!(
                "invalid definition file glob '{}': {}",
                pattern, e
            ))
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        AnalyzerError::invalid_configuration(format!("invalid definition file globs: {}", e))
    })
}

fn is_pruned(entry: &DirEntry, root: &Path, excludes: &Excludes) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name.as_ref()) {
        return true;
    }

    excludes.is_path_excluded(relative_path(root, entry.path()))
}

impl DefinitionFileFinder for FileSystemDefinitionFileFinder {
    fn find(
        &self,
        root: &Path,
        globs: &BTreeMap<String, Vec<String>>,
        excludes: &Excludes,
    ) -> Result<BTreeMap<String, Vec<PathBuf>>, AnalyzerError> {
        let matchers = globs
            .iter()
            .map(|(name, patterns)| build_globset(patterns).map(|set| (name.as_str(), set)))
            .collect::<Result<Vec<_>, AnalyzerError>>()?;

        let mut found: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_pruned(entry, root, excludes));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    warn!(error = %e, "skipping unreadable entry during discovery");
                    continue;
                }
                Err(e) => {
                    return Err(AnalyzerError::Io {
                        path: root.to_path_buf(),
                        source: io::Error::from(e),
                    })
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = relative_path(root, entry.path());
            if excludes.is_path_excluded(&relative) {
                debug!(definition_file = %relative, "skipping excluded file");
                continue;
            }

            for (name, matcher) in &matchers {
                if matcher.is_match(entry.file_name()) {
                    found
                        .entry((*name).to_string())
                        .or_default()
                        .push(entry.path().to_path_buf());
                }
            }
        }

        for files in found.values_mut() {
            files.sort();
        }

        Ok(found)
    }
}
