mod checks;
mod cli;
mod config;
mod error;
mod report;
mod scan;
mod score;
mod types;

use crate::error::{HealthError, Result};
use crate::report::HealthReport;
use crate::types::config::CheckName;
use crate::types::report::ScanResults;
use chrono::Utc;
use clap::Parser;
use tracing::{debug, info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const UNHEALTHY: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 2;
}

/// Score at or above which the run exits successfully.
const PASSING_SCORE: u32 = 50;

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(&cli);

    if !cli.root.exists() {
        return Err(HealthError::PathNotFound(cli.root.display().to_string()));
    }
    if cli.full_scan {
        debug!("--full-scan is reserved; all enabled checks already run");
    }

    let mut config = config::load_config(&cli.config);
    if let Some(list) = &cli.check {
        config.checks.enabled = parse_check_list(list);
    }

    if !cli.quiet {
        println!("Project Health Check v{}", env!("CARGO_PKG_VERSION"));
        println!("Root: {}", cli.root.display());
    }

    let generated_at = Utc::now();
    let mut results = ScanResults::default();
    for check in &config.checks.enabled {
        info!(check = check.as_str(), "running check");
        results.merge(checks::run(*check, &cli.root, &config));
    }

    debug!(total_issues = results.issues.total(), "scan complete");
    let breakdown = score::calculate(&cli.root, &results);
    let repository = cli
        .root
        .canonicalize()
        .ok()
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| cli.root.display().to_string());

    let health_report = HealthReport {
        breakdown,
        issues: results.issues,
        metrics: results.metrics,
        generated_at,
        repository,
        agent_name: config.agent.name.clone(),
        agent_version: config.agent.version.clone(),
    };

    if !cli.quiet {
        println!();
        println!(
            "Score: {}/100 ({})",
            health_report.score(),
            health_report.breakdown.tier().label()
        );
        println!("Critical: {}", health_report.issues.critical.len());
        println!("Warnings: {}", health_report.issues.warnings.len());
        println!("Passed: {}", health_report.issues.passed.len());
    }

    if cli.dry_run {
        if !cli.quiet {
            println!("Dry run: no report files written");
        }
    } else {
        let written = report::write_reports(&health_report, &cli.output, cli.json)?;
        if !cli.quiet {
            for path in &written {
                println!("Report written: {}", path.display());
            }
        }
    }

    if health_report.score() >= PASSING_SCORE {
        Ok(exit_code::SUCCESS)
    } else {
        Ok(exit_code::UNHEALTHY)
    }
}

/// `--check a,b,c` replaces the enabled set; names that do not match a known
/// check are skipped with a warning rather than failing the run.
fn parse_check_list(list: &str) -> Vec<CheckName> {
    list.split(',')
        .filter(|name| !name.trim().is_empty())
        .filter_map(|name| match name.parse::<CheckName>() {
            Ok(check) => Some(check),
            Err(e) => {
                warn!("{e}; skipping");
                None
            }
        })
        .collect()
}

fn init_tracing(cli: &cli::Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
