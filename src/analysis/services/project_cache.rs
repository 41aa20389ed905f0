use crate::analysis::domain::{Identifier, ProjectAnalyzerResult};
use crate::shared::AnalyzerError;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OnceCell;
use tracing::debug;

const SOURCE: &str = "ProjectCache";

/// Batch-scoped store of resolved projects.
///
/// Every identifier is resolved at most once successfully: the first caller
/// runs its resolver while concurrent callers for the same identifier wait
/// for it. If the resolver fails or is dropped, the entry stays empty and the
/// next waiting caller runs its own resolver.
///
/// Nested resolutions register which project waits for which, so a cycle of
/// projects waiting on each other fails with `ResolutionFailed` instead of
/// blocking forever.
#[derive(Debug, Default)]
pub struct ProjectCache {
    entries: DashMap<Identifier, Arc<OnceCell<ProjectAnalyzerResult>>>,
    definition_files: DashMap<PathBuf, Identifier>,
    waits_for: Mutex<HashMap<Identifier, Vec<Identifier>>>,
    resolution_count: AtomicUsize,
}

impl ProjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `id`, running `resolve` if there is none.
    ///
    /// # Arguments
    /// * `id` - Identifier of the project the resolver produces
    /// * `definition_file` - Definition file of that project, indexed on success
    /// * `resolve` - Resolver invoked only if no result is cached yet
    pub async fn get_or_resolve<F, Fut>(
        &self,
        id: Identifier,
        definition_file: impl Into<PathBuf>,
        resolve: F,
    ) -> Result<ProjectAnalyzerResult, AnalyzerError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ProjectAnalyzerResult, AnalyzerError>>,
    {
        self.resolve_entry(None, id, definition_file.into(), resolve)
            .await
    }

    /// Like [`ProjectCache::get_or_resolve`], for a project needed while
    /// `requester` is being resolved.
    pub async fn get_or_resolve_nested<F, Fut>(
        &self,
        requester: &Identifier,
        id: Identifier,
        definition_file: impl Into<PathBuf>,
        resolve: F,
    ) -> Result<ProjectAnalyzerResult, AnalyzerError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ProjectAnalyzerResult, AnalyzerError>>,
    {
        self.resolve_entry(Some(requester), id, definition_file.into(), resolve)
            .await
    }

    async fn resolve_entry<F, Fut>(
        &self,
        requester: Option<&Identifier>,
        id: Identifier,
        definition_file: PathBuf,
        resolve: F,
    ) -> Result<ProjectAnalyzerResult, AnalyzerError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ProjectAnalyzerResult, AnalyzerError>>,
    {
        let cell = Arc::clone(self.entries.entry(id.clone()).or_default().value());
        if let Some(result) = cell.get() {
            debug!(identifier = %id, "reusing cached project");
            return Ok(result.clone());
        }

        let _edge = match requester {
            Some(requester) => Some(self.register_wait(requester, &id, &definition_file)?),
            None => None,
        };

        let result = cell
            .get_or_try_init(|| async {
                self.resolution_count.fetch_add(1, Ordering::SeqCst);
                debug!(identifier = %id, definition_file = %definition_file.display(), "resolving project");
                resolve().await
            })
            .await?;

        self.definition_files.insert(definition_file, id);
        Ok(result.clone())
    }

    pub fn get(&self, id: &Identifier) -> Option<ProjectAnalyzerResult> {
        self.entries.get(id).and_then(|cell| cell.get().cloned())
    }

    pub fn get_by_definition_file(&self, definition_file: &Path) -> Option<ProjectAnalyzerResult> {
        let id = self.definition_files.get(definition_file)?.value().clone();
        self.get(&id)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.entries
            .get(id)
            .is_some_and(|cell| cell.initialized())
    }

    /// Number of successfully resolved projects.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times a resolver was actually run, including failed runs.
    pub fn resolution_count(&self) -> usize {
        self.resolution_count.load(Ordering::SeqCst)
    }

    fn lock_waits(&self) -> MutexGuard<'_, HashMap<Identifier, Vec<Identifier>>> {
        self.waits_for
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn register_wait(
        &self,
        requester: &Identifier,
        id: &Identifier,
        definition_file: &Path,
    ) -> Result<WaitEdge<'_>, AnalyzerError> {
        let mut waits = self.lock_waits();
        if requester == id || reaches(&waits, id, requester) {
            return Err(AnalyzerError::resolution_failed(
                definition_file,
                SOURCE,
                format!(
                    "Cyclic dependency between projects '{}' and '{}'",
                    requester, id
                ),
            ));
        }

        waits
            .entry(requester.clone())
            .or_default()
            .push(id.clone());

        Ok(WaitEdge {
            cache: self,
            from: requester.clone(),
            to: id.clone(),
        })
    }
}

/// Whether `target` is reachable from `start` in the wait-for graph.
fn reaches(waits: &HashMap<Identifier, Vec<Identifier>>, start: &Identifier, target: &Identifier) -> bool {
    let mut stack = vec![start];
    let mut visited = HashSet::new();

    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(next) = waits.get(current) {
            stack.extend(next.iter());
        }
    }

    false
}

/// Removes its wait-for edge when the waiting resolution ends or is dropped.
struct WaitEdge<'a> {
    cache: &'a ProjectCache,
    from: Identifier,
    to: Identifier,
}

impl Drop for WaitEdge<'_> {
    fn drop(&mut self) {
        let mut waits = self.cache.lock_waits();
        if let Some(targets) = waits.get_mut(&self.from) {
            if let Some(position) = targets.iter().position(|t| *t == self.to) {
                targets.remove(position);
            }
            if targets.is_empty() {
                waits.remove(&self.from);
            }
        }
    }
}
