use crate::scan::git::{run_git, GitError};
use crate::types::config::HealthConfig;
use crate::types::report::CheckOutcome;
use std::path::Path;
use tracing::debug;

/// Version-control check: working tree state, local branch count against the
/// stale-branch threshold, and recent commit activity. Every query failure
/// degrades to a warning; this check never aborts the scan.
pub fn run(root: &Path, config: &HealthConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    if !root.join(".git").exists() {
        outcome.warn("Not a git repository");
        return outcome;
    }

    match run_git(root, &["status", "--porcelain"]) {
        Ok(stdout) => {
            let changes = stdout.lines().filter(|line| !line.trim().is_empty()).count();
            if changes > 0 {
                outcome.warn(format!("Git working tree has {changes} uncommitted file(s)"));
            } else {
                outcome.pass("Git working tree is clean");
            }
        }
        Err(e) => outcome.warn(format!("Git status query failed: {e}")),
    }

    match run_git(root, &["branch", "-a"]) {
        Ok(stdout) => {
            let local: Vec<&str> = stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with("remotes/"))
                .collect();
            outcome.metric("total_branches", local.len() as i64);

            let max = config.thresholds.max_stale_branches;
            if local.len() > max {
                outcome.warn(format!(
                    "{} local branches (recommended: <{max})",
                    local.len()
                ));
            } else {
                outcome.pass(format!("{} local branches", local.len()));
            }
        }
        Err(e) => outcome.warn(format!("Git branch query failed: {e}")),
    }

    match run_git(root, &["log", "--oneline", "-n", "10"]) {
        Ok(stdout) => {
            let commits = stdout.lines().filter(|line| !line.trim().is_empty()).count();
            outcome.metric("recent_commits", commits as i64);
            outcome.pass(format!("{commits} recent commits found"));
        }
        Err(GitError::Timeout) => outcome.warn("Git log query timed out"),
        Err(e) => outcome.warn(format!("Git log query failed: {e}")),
    }

    debug!(issues = outcome.issues.len(), "git health checked");
    outcome
}
