/// Integration tests for the application layer
mod test_utilities;

use sca_analyzer::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use test_utilities::mocks::*;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn toml_use_case(
    manager: Arc<TomlManifestManager>,
    configuration: AnalyzerConfiguration,
    progress_reporter: MockProgressReporter,
) -> AnalyzeDependenciesUseCase<FileSystemDefinitionFileFinder, MockProgressReporter> {
    let mut registry = PackageManagerRegistry::new();
    registry.register(TomlManifestFactory(manager));
    AnalyzeDependenciesUseCase::new(
        registry,
        FileSystemDefinitionFileFinder::new(),
        Arc::new(MockCommandRunner::new()),
        progress_reporter,
        configuration,
    )
}

fn python_use_case(
    runner: MockCommandRunner,
    configuration: AnalyzerConfiguration,
) -> AnalyzeDependenciesUseCase<FileSystemDefinitionFileFinder, MockProgressReporter> {
    AnalyzeDependenciesUseCase::new(
        PackageManagerRegistry::with_builtin(),
        FileSystemDefinitionFileFinder::new(),
        Arc::new(runner),
        MockProgressReporter::new(),
        configuration,
    )
}

fn request(root: &TempDir) -> AnalyzeRequest {
    AnalyzeRequest::new(root.path().to_path_buf())
}

#[tokio::test]
async fn test_shared_local_project_is_resolved_once() {
    let root = TempDir::new().unwrap();
    write(
        root.path(),
        "app/deps.toml",
        r#"
name = "app"
projects = ["../lib"]

[dependencies]
requests = "2.31.0"
"#,
    );
    write(
        root.path(),
        "tool/deps.toml",
        r#"
name = "tool"
projects = ["../lib"]
"#,
    );
    write(
        root.path(),
        "lib/deps.toml",
        r#"
name = "lib"

[dependencies]
six = "1.16.0"
"#,
    );

    let manager = Arc::new(TomlManifestManager::new());
    let use_case = toml_use_case(
        manager.clone(),
        AnalyzerConfiguration::default(),
        MockProgressReporter::new(),
    );

    let result = use_case.execute(request(&root)).await.unwrap();

    assert_eq!(manager.resolution_count(), 3);
    assert_eq!(result.projects.len(), 3);
    assert!(!result.has_issues());

    let lib = result.projects["lib/deps.toml"].project_results[0].project();
    for dependent in ["app/deps.toml", "tool/deps.toml"] {
        let project = result.projects[dependent].project_results[0].project();
        let referenced = project
            .scope("main")
            .unwrap()
            .dependencies
            .iter()
            .find_map(|node| node.as_project())
            .unwrap();
        assert!(Arc::ptr_eq(referenced, lib), "{}", dependent);
    }

    let app_packages = result.projects["app/deps.toml"].project_results[0].packages();
    assert_eq!(app_packages.len(), 2);
    assert_eq!(result.packages().len(), 2);
}

#[tokio::test]
async fn test_cyclic_local_projects_fail_without_deadlock() {
    let root = TempDir::new().unwrap();
    write(root.path(), "a/deps.toml", "name = \"a\"\nprojects = [\"../b\"]\n");
    write(root.path(), "b/deps.toml", "name = \"b\"\nprojects = [\"../a\"]\n");

    let manager = Arc::new(TomlManifestManager::new());
    let use_case = toml_use_case(
        manager,
        AnalyzerConfiguration {
            timeout: Some(Duration::from_secs(10)),
            ..AnalyzerConfiguration::default()
        },
        MockProgressReporter::new(),
    );

    let result = use_case.execute(request(&root)).await.unwrap();

    let failed = result.failed_definition_files();
    assert!(!failed.is_empty());
    let messages: Vec<&str> = result
        .projects
        .values()
        .flat_map(|file| file.all_issues())
        .map(|issue| issue.message.as_str())
        .collect();
    assert!(messages.iter().any(|m| m.contains("Cyclic dependency")));
    assert!(messages.iter().all(|m| !m.contains("timeout")));
}

#[tokio::test]
async fn test_labels_and_excludes_reach_the_package_manager() {
    let root = TempDir::new().unwrap();
    write(root.path(), "app/deps.toml", "name = \"app\"\n");
    write(root.path(), "vendor/pkg/deps.toml", "name = \"vendored\"\n");

    let mut configuration = AnalyzerConfiguration::default();
    configuration.excludes.paths.push(
        PathExclude::new("vendor/**", PathExcludeReason::ProvidedBy, "vendored code").unwrap(),
    );
    configuration.excludes.scopes.push(
        ScopeExclude::new("test", ScopeExcludeReason::TestDependencyOf, "").unwrap(),
    );

    let manager = Arc::new(TomlManifestManager::new());
    let use_case = toml_use_case(manager.clone(), configuration, MockProgressReporter::new());
    let request = AnalyzeRequest::builder()
        .analysis_root(root.path())
        .label("team", "platform")
        .build()
        .unwrap();

    let result = use_case.execute(request).await.unwrap();

    assert_eq!(result.projects.keys().collect::<Vec<_>>(), vec!["app/deps.toml"]);
    let project_result = &result.projects["app/deps.toml"].project_results[0];
    assert!(project_result.excluded_scopes().contains("test"));

    let labels = manager.labels.lock().unwrap().clone();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0]["team"], "platform");
}

#[tokio::test]
async fn test_broken_manifest_does_not_fail_other_files() {
    let root = TempDir::new().unwrap();
    write(root.path(), "good/deps.toml", "name = \"good\"\n");
    write(root.path(), "bad/deps.toml", "name = [not valid toml\n");

    let progress_reporter = MockProgressReporter::new();
    let use_case = toml_use_case(
        Arc::new(TomlManifestManager::new()),
        AnalyzerConfiguration::default(),
        progress_reporter.clone(),
    );

    let result = use_case.execute(request(&root)).await.unwrap();

    assert_eq!(result.failed_definition_files(), vec!["bad/deps.toml"]);
    assert!(result.projects["good/deps.toml"].is_success());
    assert!(progress_reporter
        .errors()
        .iter()
        .any(|e| e.contains("bad/deps.toml")));
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.starts_with("Completed: ")));
}

#[tokio::test]
async fn test_cancellation_keeps_finished_results() {
    let root = TempDir::new().unwrap();
    write(root.path(), "fast/deps.toml", "name = \"fast\"\n");
    write(root.path(), "slow/deps.toml", "name = \"slow\"\ndelay_ms = 30000\n");

    let manager = Arc::new(TomlManifestManager::new());
    let use_case = toml_use_case(
        manager.clone(),
        AnalyzerConfiguration::default(),
        MockProgressReporter::new(),
    );

    let handle = CancellationHandle::new();
    let request = AnalyzeRequest::builder()
        .analysis_root(root.path())
        .cancellation(handle.signal())
        .build()
        .unwrap();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.cancel();
    });

    let result = use_case.execute(request).await.unwrap();

    assert!(result.projects["fast/deps.toml"].is_success());
    let slow = &result.projects["slow/deps.toml"];
    assert!(slow.issues[0].message.contains("cancelled"));
    assert_eq!(manager.after_resolution_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(use_case.phase(), AnalysisPhase::Done);
}

#[tokio::test]
async fn test_pipenv_delegates_to_pip_and_cleans_up() {
    let root = TempDir::new().unwrap();
    write(root.path(), "web/Pipfile.lock", "{}");
    write(root.path(), "svc/requirements.txt", "six==1.16.0\n");

    let runner = MockCommandRunner::new()
        .with_response("pipenv --version", 0, "pipenv, version 2023.7.23\n")
        .with_response("pipenv requirements", 0, "requests==2.31.0\nurllib3==2.0.4\n");
    let use_case = python_use_case(runner.clone(), AnalyzerConfiguration::default());

    let result = use_case.execute(request(&root)).await.unwrap();

    assert!(!result.has_issues(), "{:?}", result.issues);

    let web = &result.projects["web/Pipfile.lock"];
    assert_eq!(web.package_manager, "Pipenv");
    let project = web.project_results[0].project();
    assert_eq!(project.id().r#type(), "Pipenv");
    assert_eq!(project.definition_file_path(), "web/Pipfile.lock");
    let ids: Vec<String> = web.project_results[0]
        .packages()
        .iter()
        .map(|p| p.id().to_string())
        .collect();
    assert_eq!(ids, vec!["PyPI::requests:2.31.0", "PyPI::urllib3:2.0.4"]);

    let svc = &result.projects["svc/requirements.txt"];
    assert_eq!(svc.package_manager, "Pip");

    assert!(!root.path().join("web/requirements-from-pipenv.txt").exists());
    assert_eq!(
        runner.command_lines(),
        vec!["pipenv --version", "pipenv requirements"]
    );
}

#[tokio::test]
async fn test_incompatible_tool_version_only_fails_its_batch() {
    let root = TempDir::new().unwrap();
    write(root.path(), "web/Pipfile.lock", "{}");
    write(root.path(), "svc/requirements.txt", "six==1.16.0\n");

    let runner = MockCommandRunner::new().with_response(
        "pipenv --version",
        0,
        "pipenv, version 2018.5.18\n",
    );
    let use_case = python_use_case(runner.clone(), AnalyzerConfiguration::default());

    let result = use_case.execute(request(&root)).await.unwrap();

    let web = &result.projects["web/Pipfile.lock"];
    assert!(!web.is_success());
    assert!(web.issues[0].message.contains("2018.5.18"));
    assert_eq!(result.issues["Pipenv"].len(), 1);
    assert!(result.projects["svc/requirements.txt"].is_success());
    assert_eq!(runner.command_lines(), vec!["pipenv --version"]);
}

#[tokio::test]
async fn test_package_configurations_match_resolved_packages() {
    let root = TempDir::new().unwrap();
    write(root.path(), "app/deps.toml", "name = \"app\"\n[dependencies]\nsix = \"1.16.0\"\nattrs = \"23.1.0\"\n");

    let use_case = toml_use_case(
        Arc::new(TomlManifestManager::new()),
        AnalyzerConfiguration::default(),
        MockProgressReporter::new(),
    );
    let result = use_case.execute(request(&root)).await.unwrap();

    let provider = PackageConfigurationProvider::new(vec![
        PackageConfiguration::builder("Mock::six:[1.0,2.0)".parse().unwrap())
            .source_code_origin(SourceCodeOrigin::Artifact)
            .build()
            .unwrap(),
        PackageConfiguration::builder("Mock::six:1.16.0".parse().unwrap())
            .source_artifact_url("https://repo.example.org/six-1.16.0.tar.gz")
            .build()
            .unwrap(),
        PackageConfiguration::builder("Mock::six:1.16.0".parse().unwrap())
            .source_artifact_url("https://mirror.example.org/six-1.16.0.tar.gz")
            .build()
            .unwrap(),
    ]);
    let matches = MatchPackageConfigurationsUseCase::new(provider).execute(&result);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id.name(), "six");
    assert_eq!(matches[0].configurations, vec![0, 1]);

    let report = AnalysisReport::new(result, matches);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(
        json["package_configuration_matches"][0]["configurations"],
        serde_json::json!([0, 1])
    );
}
