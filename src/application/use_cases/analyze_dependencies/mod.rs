use crate::analysis::domain::{AnalyzerConfiguration, AnalyzerResult, DefinitionFileResult, Excludes, Issue};
use crate::analysis::services::ProjectCache;
use crate::application::dto::AnalyzeRequest;
use crate::application::factories::PackageManagerRegistry;
use crate::ports::outbound::{
    relative_path, CommandRunner, DefinitionFileFinder, Labels, PackageManager, ProgressReporter,
    ResolutionContext,
};
use crate::shared::{AnalyzerError, CancellationSignal};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Lifecycle of an analysis run.
///
/// Individual definition files fail independently while the run stays in
/// `Resolving`; their failures end up as issues on their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Idle,
    Discovering,
    Resolving,
    Aggregating,
    Done,
}

/// Definition files assigned to one package manager.
struct Batch {
    manager: Arc<dyn PackageManager>,
    files: Vec<PathBuf>,
}

struct BatchOutcome {
    package_manager: String,
    file_results: Vec<(PathBuf, DefinitionFileResult)>,
    /// Issues that concern the whole batch rather than a single file.
    issues: Vec<Issue>,
}

impl BatchOutcome {
    fn new(package_manager: &str) -> Self {
        Self {
            package_manager: package_manager.to_string(),
            file_results: Vec::new(),
            issues: Vec::new(),
        }
    }

    fn fail_all(&mut self, files: &[PathBuf], issues: &[Issue]) {
        for file in files {
            self.file_results.push((
                file.clone(),
                DefinitionFileResult::failed(&self.package_manager, issues.to_vec()),
            ));
        }
    }
}

/// Cancellation and timeout of a single run.
struct RunLimits {
    cancellation: CancellationSignal,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
}

impl RunLimits {
    fn new(cancellation: CancellationSignal, timeout: Option<Duration>) -> Self {
        Self {
            cancellation,
            timeout,
            deadline: timeout.map(|t| Instant::now() + t),
        }
    }

    /// The reason to stop, if the run is already interrupted.
    fn check(&self) -> Option<String> {
        if self.cancellation.is_cancelled() {
            Some(self.cancelled_reason())
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(self.timeout_reason())
        } else {
            None
        }
    }

    /// Completes with the reason to stop once the run is interrupted.
    async fn interrupted(&self) -> String {
        let timeout = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = self.cancellation.cancelled() => self.cancelled_reason(),
            _ = timeout => self.timeout_reason(),
        }
    }

    fn cancelled_reason(&self) -> String {
        "analysis was cancelled".to_string()
    }

    fn timeout_reason(&self) -> String {
        format!(
            "analysis exceeded the timeout of {}s",
            self.timeout.unwrap_or_default().as_secs_f64()
        )
    }
}

fn cancelled_issues(package_manager: &str, reason: &str) -> Vec<Issue> {
    AnalyzerError::Cancelled {
        reason: reason.to_string(),
    }
    .into_issues(package_manager)
}

/// AnalyzeDependenciesUseCase - Core use case of the analyzer
///
/// Discovers definition files below the analysis root, assigns each file to
/// exactly one package manager and resolves the files batch by batch. Files
/// within a batch are resolved concurrently and share one project cache.
///
/// # Type Parameters
/// * `F` - DefinitionFileFinder implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeDependenciesUseCase<F, PR> {
    registry: PackageManagerRegistry,
    finder: F,
    command_runner: Arc<dyn CommandRunner>,
    progress_reporter: PR,
    configuration: AnalyzerConfiguration,
    phase: Mutex<AnalysisPhase>,
}

impl<F, PR> AnalyzeDependenciesUseCase<F, PR>
where
    F: DefinitionFileFinder,
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeDependenciesUseCase with injected dependencies
    pub fn new(
        registry: PackageManagerRegistry,
        finder: F,
        command_runner: Arc<dyn CommandRunner>,
        progress_reporter: PR,
        configuration: AnalyzerConfiguration,
    ) -> Self {
        Self {
            registry,
            finder,
            command_runner,
            progress_reporter,
            configuration,
            phase: Mutex::new(AnalysisPhase::Idle),
        }
    }

    pub fn phase(&self) -> AnalysisPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, phase: AnalysisPhase) {
        debug!(?phase, "analysis phase changed");
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }

    /// Executes the analysis
    ///
    /// # Arguments
    /// * `request` - Analysis root, labels and optional cancellation signal
    ///
    /// # Returns
    /// The aggregated result. Failing definition files and package managers
    /// are recorded as issues, they do not fail the run.
    ///
    /// # Errors
    /// `Io` if the analysis root cannot be read, `InvalidConfiguration` if it
    /// is not a directory or a glob is invalid.
    pub async fn execute(&self, request: AnalyzeRequest) -> Result<AnalyzerResult, AnalyzerError> {
        self.set_phase(AnalysisPhase::Discovering);

        // Step 1: Canonicalize the root so discovered and referenced paths agree
        let analysis_root = Self::canonical_root(&request.analysis_root)?;

        // Step 2: Discover definition files and assign them to package managers
        let batches = self.discover(&analysis_root)?;

        // Step 3: Resolve the batches in priority order
        self.set_phase(AnalysisPhase::Resolving);
        let limits = RunLimits::new(
            request.cancellation.clone().unwrap_or_else(CancellationSignal::never),
            self.configuration.timeout,
        );
        let excludes = Arc::new(self.configuration.excludes.clone());

        let mut outcomes = Vec::with_capacity(batches.len());
        for batch in batches {
            let outcome = match limits.check() {
                Some(reason) => self.skip_batch(batch, &reason),
                None => {
                    self.run_batch(batch, &analysis_root, &request.labels, &excludes, &limits)
                        .await
                }
            };
            outcomes.push(outcome);
        }

        // Step 4: Aggregate
        self.set_phase(AnalysisPhase::Aggregating);
        let result = Self::aggregate(&analysis_root, outcomes);
        self.report_summary(&result);

        self.set_phase(AnalysisPhase::Done);
        Ok(result)
    }

    fn canonical_root(root: &Path) -> Result<PathBuf, AnalyzerError> {
        let canonical = std::fs::canonicalize(root).map_err(|source| AnalyzerError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        if !canonical.is_dir() {
            return Err(AnalyzerError::invalid_configuration(format!(
                "analysis root {} is not a directory",
                root.display()
            )));
        }
        Ok(canonical)
    }

    /// Discovers definition files and builds one batch per package manager
    ///
    /// A file claimed by several package managers goes to the one with the
    /// highest priority. Batches are returned in descending priority.
    fn discover(&self, analysis_root: &Path) -> Result<Vec<Batch>, AnalyzerError> {
        let managers = self.registry.create_enabled(
            analysis_root,
            &self.configuration,
            self.command_runner.clone(),
        );
        let globs: BTreeMap<String, Vec<String>> = managers
            .iter()
            .map(|manager| (manager.name().to_string(), manager.globs_for_definition_files()))
            .collect();

        self.progress_reporter.report(&format!(
            "🔍 Discovering definition files in: {}",
            analysis_root.display()
        ));
        let found = self
            .finder
            .find(analysis_root, &globs, &self.configuration.excludes)?;

        let mut claims: BTreeMap<&Path, Vec<&str>> = BTreeMap::new();
        for (name, files) in &found {
            for file in files {
                claims.entry(file.as_path()).or_default().push(name.as_str());
            }
        }

        let priority = self.configuration.priority();
        let mut assigned: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
        for (file, candidates) in &claims {
            if let Some(winner) = priority.preferred(candidates) {
                if candidates.len() > 1 {
                    debug!(
                        definition_file = %file.display(),
                        candidates = ?candidates,
                        package_manager = winner,
                        "definition file claimed by several package managers"
                    );
                }
                assigned.entry(winner).or_default().push(file.to_path_buf());
            }
        }

        self.progress_reporter
            .report(&format!("✅ Found {} definition file(s)", claims.len()));

        let mut names: Vec<&str> = assigned.keys().copied().collect();
        priority.sort(&mut names);

        Ok(names
            .into_iter()
            .filter_map(|name| {
                let manager = managers.iter().find(|m| m.name() == name)?.clone();
                let files = assigned.remove(name)?;
                Some(Batch { manager, files })
            })
            .collect())
    }

    /// Records every file of a batch that never started as cancelled
    fn skip_batch(&self, batch: Batch, reason: &str) -> BatchOutcome {
        let name = batch.manager.name();
        info!(package_manager = name, reason, "skipping batch");

        let mut outcome = BatchOutcome::new(name);
        outcome.fail_all(&batch.files, &cancelled_issues(name, reason));
        outcome
    }

    async fn run_batch(
        &self,
        batch: Batch,
        analysis_root: &Path,
        labels: &Labels,
        excludes: &Arc<Excludes>,
        limits: &RunLimits,
    ) -> BatchOutcome {
        let Batch { manager, files } = batch;
        let name = manager.name().to_string();
        let mut outcome = BatchOutcome::new(&name);

        info!(package_manager = %name, files = files.len(), "resolving batch");
        self.progress_reporter.report(&format!(
            "📦 Resolving {} definition file(s) with {}...",
            files.len(),
            name
        ));

        let prepared = tokio::select! {
            result = manager.before_resolution(&files) => Ok(result),
            reason = limits.interrupted() => Err(reason),
        };

        match prepared {
            Ok(Ok(())) => {
                let context = ResolutionContext::new(
                    analysis_root,
                    files.clone(),
                    Arc::new(ProjectCache::new()),
                    excludes.clone(),
                );
                let file_results = self
                    .resolve_files(manager.as_ref(), &files, labels, &context, limits)
                    .await;
                outcome.file_results.extend(file_results);
            }
            Ok(Err(error)) => {
                warn!(package_manager = %name, error = %error, "package manager cannot resolve its batch");
                self.progress_reporter
                    .report_error(&format!("⚠️  {} skipped: {}", name, error));
                let issues = error.into_issues(&name);
                outcome.fail_all(&files, &issues);
                outcome.issues = issues;
            }
            Err(reason) => {
                warn!(package_manager = %name, reason = %reason, "batch interrupted before resolution");
                outcome.fail_all(&files, &cancelled_issues(&name, &reason));
            }
        }

        manager.after_resolution(&files).await;
        info!(package_manager = %name, "finished batch");

        outcome
    }

    /// Resolves the files of one batch with bounded concurrency
    ///
    /// On cancellation or timeout the in-flight resolutions are dropped and
    /// every unfinished file gets a `Cancelled` issue.
    async fn resolve_files(
        &self,
        manager: &dyn PackageManager,
        files: &[PathBuf],
        labels: &Labels,
        context: &ResolutionContext,
        limits: &RunLimits,
    ) -> BTreeMap<PathBuf, DefinitionFileResult> {
        let name = manager.name();
        let total = files.len();
        let batch_failure = OnceLock::new();
        let mut finished = BTreeMap::new();

        let mut resolutions = stream::iter(files)
            .map(|file| self.resolve_file(manager, file, labels, context, &batch_failure))
            .buffer_unordered(self.configuration.parallel_jobs());

        let interruption = loop {
            tokio::select! {
                next = resolutions.next() => match next {
                    Some((file, result)) => {
                        finished.insert(file, result);
                        self.progress_reporter
                            .report_progress(finished.len(), total, Some(name));
                    }
                    None => break None,
                },
                reason = limits.interrupted() => break Some(reason),
            }
        };

        // Dropping the stream aborts in-flight resolutions and kills their subprocesses.
        drop(resolutions);

        if let Some(reason) = interruption {
            warn!(
                package_manager = name,
                unfinished = total - finished.len(),
                reason = %reason,
                "resolution interrupted"
            );
            for file in files {
                finished
                    .entry(file.clone())
                    .or_insert_with(|| DefinitionFileResult::failed(name, cancelled_issues(name, &reason)));
            }
        }

        finished
    }

    async fn resolve_file(
        &self,
        manager: &dyn PackageManager,
        file: &Path,
        labels: &Labels,
        context: &ResolutionContext,
        batch_failure: &OnceLock<Vec<Issue>>,
    ) -> (PathBuf, DefinitionFileResult) {
        let name = manager.name();

        if let Some(issues) = batch_failure.get() {
            return (file.to_path_buf(), DefinitionFileResult::failed(name, issues.clone()));
        }

        // A file already reached as a reference of another project is not resolved again.
        if let Some(cached) = context.project_cache().get_by_definition_file(file) {
            debug!(definition_file = %file.display(), project = %cached.project().id(), "reusing cached project");
            return (
                file.to_path_buf(),
                DefinitionFileResult::new(name, vec![cached.with_scope_excludes(context.excludes())]),
            );
        }

        debug!(package_manager = name, definition_file = %file.display(), "resolving definition file");
        let result = match manager.resolve_dependencies(file, labels, context).await {
            Ok(results) => DefinitionFileResult::new(
                name,
                results
                    .into_iter()
                    .map(|result| result.with_scope_excludes(context.excludes()))
                    .collect(),
            ),
            Err(error) => {
                warn!(package_manager = name, definition_file = %file.display(), error = %error, "failed to resolve definition file");
                let batch_fatal = error.is_batch_fatal();
                let issues = error.into_issues(name);
                if batch_fatal {
                    let _ = batch_failure.set(issues.clone());
                }
                DefinitionFileResult::failed(name, issues)
            }
        };

        (file.to_path_buf(), result)
    }

    fn aggregate(analysis_root: &Path, outcomes: Vec<BatchOutcome>) -> AnalyzerResult {
        let mut result = AnalyzerResult::default();
        for outcome in outcomes {
            for issue in outcome.issues {
                result.add_issue(&outcome.package_manager, issue);
            }
            for (file, file_result) in outcome.file_results {
                result
                    .projects
                    .insert(relative_path(analysis_root, &file), file_result);
            }
        }
        result
    }

    fn report_summary(&self, result: &AnalyzerResult) {
        let failed = result.failed_definition_files();
        if !failed.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  {} definition file(s) could not be resolved: {}",
                failed.len(),
                failed.join(", ")
            ));
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Analyzed {} definition file(s), found {} package(s)",
            result.projects.len(),
            result.packages().len()
        ));
    }
}
