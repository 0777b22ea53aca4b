use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repo-health",
    version,
    about = "Project structure health agent: scans a repository and produces a scored report"
)]
pub struct Cli {
    /// Project root to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Override configuration file; ignored when absent
    #[arg(long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Destination directory for generated reports
    #[arg(long, default_value = "reports")]
    pub output: PathBuf,

    /// Reserved: the full enabled-check set already runs by default
    #[arg(long)]
    pub full_scan: bool,

    /// Scan and print the summary without writing report files
    #[arg(long)]
    pub dry_run: bool,

    /// Run only the named checks (comma-separated), overriding configuration
    #[arg(long, value_name = "LIST")]
    pub check: Option<String>,

    /// Additionally emit a JSON report
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
