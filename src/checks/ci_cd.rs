use crate::scan::filesystem::read_to_string_if_exists;
use crate::types::config::HealthConfig;
use crate::types::report::CheckOutcome;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Quoted value assigned to a secret-looking workflow key. The captured value
/// is inspected separately because the regex crate has no lookahead.
static SECRET_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:password|token|api[_-]?key|secret)\s*:\s*["']([^"']{8,})["']"#)
        .expect("secret assignment pattern should compile")
});

/// `${{ secrets.* }}` or `env.` interpolation anywhere in the workflow marks
/// the file as using proper secret references.
static SECRET_INTERPOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\{\s*secrets\.|env\.").expect("interpolation pattern should compile")
});

/// CI workflow check: enumerates GitHub Actions definitions, flags outdated
/// checkout pins, and runs a best-effort hardcoded-secret heuristic. The
/// secret scan is a linter stage, not a security control.
pub fn run(root: &Path, _config: &HealthConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    let workflows_dir = root.join(".github/workflows");
    if !workflows_dir.exists() {
        outcome.warn("No GitHub Actions workflows found");
        return outcome;
    }

    let workflows = workflow_files(&workflows_dir);
    outcome.metric("workflow_count", workflows.len() as i64);

    if workflows.is_empty() {
        outcome.warn("No workflows configured");
        return outcome;
    }
    outcome.pass(format!("{} workflow(s) configured", workflows.len()));

    for workflow in &workflows {
        let name = workflow
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(content) = read_to_string_if_exists(workflow) else {
            outcome.warn(format!("Failed to read workflow {name}"));
            continue;
        };

        if content.contains("actions/checkout@v4") || content.contains("actions/checkout@v3") {
            outcome.pass(format!("{name}: uses a modern checkout action"));
        } else if content.contains("actions/checkout@v2")
            || content.contains("actions/checkout@v1")
        {
            outcome.warn(format!("{name}: uses an outdated checkout action version"));
        }

        if has_suspect_secret(&content) {
            outcome.critical(format!("{name}: possible hardcoded secret detected"));
        }
    }

    debug!(workflows = workflows.len(), "ci/cd checked");
    outcome
}

fn workflow_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml")
        })
        .collect();
    files.sort();
    files
}

fn has_suspect_secret(content: &str) -> bool {
    let suspect = SECRET_ASSIGNMENT.captures_iter(content).any(|captures| {
        let value = &captures[1];
        !value.starts_with('$') && !value.starts_with('{')
    });
    suspect && !SECRET_INTERPOLATION.is_match(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn write_workflow(root: &Path, name: &str, content: &str) {
        let dir = root.join(".github/workflows");
        fs::create_dir_all(&dir).expect("workflow dir should create");
        fs::write(dir.join(name), content).expect("workflow should write");
    }

    #[test]
    fn missing_workflow_directory_is_a_warning() {
        let dir = TempDir::new().expect("temp dir should be created");
        let outcome = run(dir.path(), &HealthConfig::default());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].severity, Severity::Warning);
        assert!(outcome.metrics.get("workflow_count").is_none());
    }

    #[test]
    fn modern_checkout_pin_passes() {
        let dir = TempDir::new().expect("temp dir should be created");
        write_workflow(
            dir.path(),
            "ci.yml",
            "steps:\n  - uses: actions/checkout@v4\n",
        );

        let outcome = run(dir.path(), &HealthConfig::default());
        assert_eq!(outcome.metrics.get("workflow_count"), Some(&1));
        assert!(outcome
            .issues
            .iter()
            .any(|issue| issue.message == "ci.yml: uses a modern checkout action"));
    }

    #[test]
    fn outdated_checkout_pin_is_a_warning() {
        let dir = TempDir::new().expect("temp dir should be created");
        write_workflow(
            dir.path(),
            "ci.yml",
            "steps:\n  - uses: actions/checkout@v2\n",
        );

        let outcome = run(dir.path(), &HealthConfig::default());
        assert!(outcome.issues.iter().any(|issue| {
            issue.severity == Severity::Warning
                && issue.message == "ci.yml: uses an outdated checkout action version"
        }));
    }

    #[test]
    fn hardcoded_secret_is_critical() {
        let dir = TempDir::new().expect("temp dir should be created");
        write_workflow(
            dir.path(),
            "deploy.yml",
            "env:\n  api_key: \"abcdef1234567890\"\n",
        );

        let outcome = run(dir.path(), &HealthConfig::default());
        assert!(outcome.issues.iter().any(|issue| {
            issue.severity == Severity::Critical
                && issue.message == "deploy.yml: possible hardcoded secret detected"
        }));
    }

    #[test]
    fn interpolated_secret_reference_is_not_flagged() {
        let dir = TempDir::new().expect("temp dir should be created");
        write_workflow(
            dir.path(),
            "deploy.yml",
            "env:\n  token: \"${{ secrets.DEPLOY_TOKEN }}\"\n",
        );

        let outcome = run(dir.path(), &HealthConfig::default());
        assert!(!outcome
            .issues
            .iter()
            .any(|issue| issue.severity == Severity::Critical));
    }
}
