use clap::Parser;
use std::path::PathBuf;

/// Resolve the dependencies of every project below a directory
#[derive(Parser, Debug)]
#[command(name = "sca-analyzer")]
#[command(version)]
#[command(
    about = "Resolve the dependencies of every project below a directory",
    long_about = None
)]
pub struct Args {
    /// Path to the directory to analyze (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Path to a config file (defaults to sca-analyzer.config.yml in the analyzed directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of definition files resolved concurrently
    #[arg(short, long, value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Abort unfinished resolutions after this many seconds
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Exclude paths matching a glob, relative to the analyzed directory
    /// Can be specified multiple times: -e "tests/**" -e "docs/**"
    #[arg(short = 'e', long = "exclude-path", value_name = "GLOB")]
    pub exclude_paths: Vec<String>,

    /// Label passed to every package manager
    /// Can be specified multiple times: -l team=platform -l env=ci
    #[arg(short, long = "label", value_name = "KEY=VALUE", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_jobs(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("the number of jobs must be at least 1".to_string()),
        Ok(jobs) => Ok(jobs),
        Err(e) => Err(format!("Invalid number of jobs '{}': {}", s, e)),
    }
}

fn parse_label(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!(
            "Invalid label: {}. Please specify labels as KEY=VALUE",
            s
        )),
    }
}
