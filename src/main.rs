mod cli;
mod config;
mod logging;

use cli::Args;
use config::{discover_config, load_config_from_path};
use owo_colors::OwoColorize;
use sca_analyzer::adapters::outbound::console::StderrProgressReporter;
use sca_analyzer::adapters::outbound::filesystem::FileSystemDefinitionFileFinder;
use sca_analyzer::adapters::outbound::process::TokioCommandRunner;
use sca_analyzer::analysis::domain::{
    AnalyzerConfiguration, AnalyzerResult, PathExclude, PathExcludeReason,
};
use sca_analyzer::analysis::services::PackageConfigurationProvider;
use sca_analyzer::application::dto::{AnalysisReport, AnalyzeRequest};
use sca_analyzer::application::factories::{
    PackageManagerRegistry, PresenterFactory, PresenterType,
};
use sca_analyzer::application::use_cases::{
    AnalyzeDependenciesUseCase, MatchPackageConfigurationsUseCase,
};
use sca_analyzer::shared::{AnalyzerError, CancellationHandle, ExitCode, Result};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init() {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
    }

    // Parse command-line arguments (exits with code 2 on invalid arguments)
    let args = Args::parse_args();

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let analysis_root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    validate_analysis_root(&analysis_root)?;

    // Load configuration, then let command-line flags override it
    let config_file = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&analysis_root)?,
    };
    let configuration = apply_cli_overrides(
        config_file
            .map(|file| file.into_configuration())
            .unwrap_or_default(),
        &args,
    )?;

    // Ctrl-C cancels the run; finished results are still reported
    let cancellation = CancellationHandle::new();
    let signal = cancellation.signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("⚠️  Interrupted, cancelling unfinished resolutions...");
            cancellation.cancel();
        }
    });

    let provider = PackageConfigurationProvider::new(configuration.package_configurations.clone());

    // Create adapters and use case (Dependency Injection)
    let use_case = AnalyzeDependenciesUseCase::new(
        PackageManagerRegistry::with_builtin(),
        FileSystemDefinitionFileFinder::new(),
        Arc::new(TokioCommandRunner::new()),
        StderrProgressReporter::new(),
        configuration,
    );

    let request = AnalyzeRequest::builder()
        .analysis_root(analysis_root)
        .labels(args.labels.iter().cloned().collect())
        .cancellation(signal)
        .build()?;

    let result = use_case.execute(request).await?;
    let matches = MatchPackageConfigurationsUseCase::new(provider).execute(&result);
    print_summary(&result, matches.len());

    let report = AnalysisReport::new(result, matches);
    let presenter = PresenterFactory::create(PresenterType::from(args.output));
    presenter.present(&report.to_json()?)?;

    Ok(if report.analyzer.has_issues() {
        ExitCode::IssuesDetected
    } else {
        ExitCode::Success
    })
}

fn apply_cli_overrides(
    mut configuration: AnalyzerConfiguration,
    args: &Args,
) -> Result<AnalyzerConfiguration> {
    if let Some(jobs) = args.jobs {
        configuration.parallel_jobs = jobs;
    }
    if let Some(seconds) = args.timeout {
        configuration.timeout = Some(Duration::from_secs(seconds));
    }
    for pattern in &args.exclude_paths {
        configuration.excludes.paths.push(PathExclude::new(
            pattern.as_str(),
            PathExcludeReason::Other,
            "Excluded on the command line",
        )?);
    }
    Ok(configuration)
}

fn validate_analysis_root(path: &Path) -> Result<()> {
    let invalid = |reason: &str| {
        AnalyzerError::invalid_configuration(format!(
            "{}: {}\n\n💡 Hint: Pass an existing directory with --path.",
            path.display(),
            reason
        ))
    };

    if !path.exists() {
        return Err(invalid("Directory does not exist").into());
    }
    if !path.is_dir() {
        return Err(invalid("Not a directory").into());
    }
    Ok(())
}

fn print_summary(result: &AnalyzerResult, matched_packages: usize) {
    let failed = result.failed_definition_files();
    eprintln!();
    eprintln!(
        "📊 {} definition file(s), {} package(s), {} with package configurations",
        result.projects.len().bold(),
        result.packages().len().bold(),
        matched_packages.bold()
    );
    if failed.is_empty() {
        eprintln!("{}", "All definition files resolved".green());
    } else {
        eprintln!(
            "{}",
            format!("{} definition file(s) had errors:", failed.len())
                .red()
                .bold()
        );
        for path in failed {
            eprintln!("  - {}", path.red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_analysis_root_valid_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_analysis_root(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_validate_analysis_root_nonexistent() {
        let result = validate_analysis_root(Path::new("/nonexistent/path/that/does/not/exist"));
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Directory does not exist"));
    }

    #[test]
    fn test_validate_analysis_root_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");
        fs::write(&file_path, "test content").unwrap();

        let err_string = format!("{}", validate_analysis_root(&file_path).unwrap_err());
        assert!(err_string.contains("Not a directory"));
    }

    #[test]
    fn test_cli_flags_override_configuration() {
        let args = Args::try_parse_from([
            "sca-analyzer",
            "--jobs",
            "3",
            "--timeout",
            "10",
            "-e",
            "vendor/**",
        ])
        .unwrap();
        let configuration = AnalyzerConfiguration {
            parallel_jobs: 8,
            ..AnalyzerConfiguration::default()
        };

        let configuration = apply_cli_overrides(configuration, &args).unwrap();
        assert_eq!(configuration.parallel_jobs(), 3);
        assert_eq!(configuration.timeout, Some(Duration::from_secs(10)));
        assert!(configuration.excludes.is_path_excluded("vendor/lib/requirements.txt"));
    }

    #[test]
    fn test_cli_invalid_exclude_glob_is_rejected() {
        let args = Args::try_parse_from(["sca-analyzer", "-e", "[oops"]).unwrap();
        assert!(apply_cli_overrides(AnalyzerConfiguration::default(), &args).is_err());
    }
}
