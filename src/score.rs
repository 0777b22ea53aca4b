use crate::types::report::ScanResults;
use crate::types::scoring::{
    ScoreBreakdown, MAX_CI_CD, MAX_DEPENDENCIES, MAX_DOCUMENTATION, MAX_FILE_STRUCTURE,
    MAX_GIT_HEALTH, MAX_SECURITY, TEST_BONUS,
};
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Computes the composite score from the final issue/metric state. Pure in
/// everything but the test-file probe; issues are classified by
/// case-insensitive substring since severity and text are all an issue
/// carries. The weighting is a coarse linting heuristic, not a validated
/// quality metric.
pub fn calculate(root: &Path, results: &ScanResults) -> ScoreBreakdown {
    let issues = &results.issues;
    let metrics = &results.metrics;

    let file_structure = penalize(
        MAX_FILE_STRUCTURE,
        5,
        count_matching(&issues.critical, &["missing critical file"]),
    );
    let dependencies = penalize(
        MAX_DEPENDENCIES,
        5,
        count_matching(&issues.critical, &["dependenc"]),
    );
    let git_health = penalize(
        MAX_GIT_HEALTH,
        3,
        count_matching(&issues.warnings, &["git", "branch"]),
    );
    let ci_cd = (metric(metrics, "workflow_count") * 7).min(MAX_CI_CD as i64) as u32;
    let security = penalize(
        MAX_SECURITY,
        2,
        metric(metrics, "security_issues").max(0) as usize,
    )
    .saturating_sub(5 * count_matching(&issues.critical, &["sensitive", "hardcoded"]) as u32);
    let documentation = documentation_score(metrics);
    let test_bonus = if has_test_files(root) { TEST_BONUS } else { 0 };

    let total = (file_structure
        + dependencies
        + git_health
        + ci_cd
        + security
        + documentation
        + test_bonus)
        .min(100);

    ScoreBreakdown {
        file_structure,
        dependencies,
        git_health,
        ci_cd,
        security,
        documentation,
        test_bonus,
        total,
    }
}

fn penalize(max: u32, per_hit: u32, hits: usize) -> u32 {
    max.saturating_sub(per_hit * hits as u32)
}

fn count_matching(messages: &[String], needles: &[&str]) -> usize {
    messages
        .iter()
        .filter(|message| {
            let lowered = message.to_lowercase();
            needles.iter().any(|needle| lowered.contains(needle))
        })
        .count()
}

fn metric(metrics: &BTreeMap<String, i64>, name: &str) -> i64 {
    metrics.get(name).copied().unwrap_or(0)
}

fn documentation_score(metrics: &BTreeMap<String, i64>) -> u32 {
    let percentage = metric(metrics, "documentation_percentage").clamp(0, 100);
    ((MAX_DOCUMENTATION as f64 * percentage as f64) / 100.0).round() as u32
}

/// Partial test-coverage credit: any conventionally named test file under
/// `test/` earns the bonus. No actual coverage is measured.
fn has_test_files(root: &Path) -> bool {
    let test_dir = root.join("test");
    if !test_dir.is_dir() {
        return false;
    }
    WalkDir::new(&test_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .any(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with("_test.dart"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn results() -> ScanResults {
        ScanResults::default()
    }

    #[test]
    fn perfect_inputs_stay_within_bounds() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut state = results();
        state.metrics.insert("workflow_count".to_string(), 10);
        state
            .metrics
            .insert("documentation_percentage".to_string(), 100);

        let breakdown = calculate(dir.path(), &state);
        assert_eq!(breakdown.ci_cd, 15);
        assert_eq!(breakdown.documentation, 10);
        assert!(breakdown.total <= 100);
    }

    #[test]
    fn workflow_subscore_is_seven_per_workflow_capped_at_fifteen() {
        let dir = TempDir::new().expect("temp dir should be created");
        for (count, expected) in [(0, 0), (1, 7), (2, 14), (3, 15), (8, 15)] {
            let mut state = results();
            state.metrics.insert("workflow_count".to_string(), count);
            assert_eq!(calculate(dir.path(), &state).ci_cd, expected);
        }
    }

    #[test]
    fn missing_critical_files_reduce_file_structure() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut state = results();
        state
            .issues
            .critical
            .push("Missing critical file: pubspec.yaml".to_string());
        state
            .issues
            .critical
            .push("Missing critical file: lib/main.dart".to_string());

        let breakdown = calculate(dir.path(), &state);
        assert_eq!(breakdown.file_structure, 10);
        assert!(breakdown.file_structure < 20);
    }

    #[test]
    fn file_structure_floors_at_zero() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut state = results();
        for i in 0..10 {
            state
                .issues
                .critical
                .push(format!("Missing critical file: f{i}"));
        }
        assert_eq!(calculate(dir.path(), &state).file_structure, 0);
    }

    #[test]
    fn sensitive_file_cuts_security_by_seven() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut state = results();
        state
            .issues
            .critical
            .push("Sensitive files found: key.properties".to_string());
        state.metrics.insert("security_issues".to_string(), 1);

        let breakdown = calculate(dir.path(), &state);
        // 15 - 2*1 - 5*1
        assert_eq!(breakdown.security, 8);
    }

    #[test]
    fn git_warnings_cost_three_each() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut state = results();
        state
            .issues
            .warnings
            .push("Git working tree has 3 uncommitted file(s)".to_string());
        state
            .issues
            .warnings
            .push("7 local branches (recommended: <5)".to_string());

        assert_eq!(calculate(dir.path(), &state).git_health, 9);
    }

    #[test]
    fn documentation_score_rounds_percentage() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut state = results();
        state
            .metrics
            .insert("documentation_percentage".to_string(), 66);
        assert_eq!(calculate(dir.path(), &state).documentation, 7);
    }

    #[test]
    fn test_files_earn_partial_coverage_bonus() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("test")).expect("test dir should create");
        fs::write(dir.path().join("test/widget_test.dart"), "void main() {}")
            .expect("test file should write");

        let breakdown = calculate(dir.path(), &results());
        assert_eq!(breakdown.test_bonus, 5);
    }

    #[test]
    fn flawless_scan_totals_ninety_five() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("test")).expect("test dir should create");
        fs::write(dir.path().join("test/a_test.dart"), "").expect("test file should write");

        let mut state = results();
        state.metrics.insert("workflow_count".to_string(), 5);
        state
            .metrics
            .insert("documentation_percentage".to_string(), 100);

        let breakdown = calculate(dir.path(), &state);
        // 20 + 15 + 15 + 15 + 15 + 10 + 5
        assert_eq!(breakdown.total, 95);
        assert!(breakdown.total <= 100);
    }
}
