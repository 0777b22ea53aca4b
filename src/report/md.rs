use super::{HealthReport, MAX_PASSED_SHOWN, MAX_WARNINGS_SHOWN};
use crate::types::scoring::{
    MAX_CI_CD, MAX_DEPENDENCIES, MAX_DOCUMENTATION, MAX_FILE_STRUCTURE, MAX_GIT_HEALTH,
    MAX_SECURITY, TEST_BONUS,
};
use std::fmt::Write;

/// Renders the Markdown health report. Pure with respect to the report; the
/// run timestamp is embedded in the header, so two runs at different times
/// produce different documents for the same tree.
pub fn to_markdown(report: &HealthReport) -> String {
    let mut out = String::new();
    let tier = report.breakdown.tier();

    let _ = writeln!(out, "# Project Health Report\n");
    let _ = writeln!(
        out,
        "**Date**: {}  ",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "**Repository**: {}  ", report.repository);
    let _ = writeln!(out, "**Agent Version**: {}\n", report.agent_version);
    let _ = writeln!(
        out,
        "## Overall Health Score: {}/100 ({})\n",
        report.score(),
        tier.label()
    );
    out.push_str("---\n\n");

    render_critical(&mut out, report);
    render_warnings(&mut out, report);
    render_passed(&mut out, report);
    render_recommendations(&mut out, report);
    render_metrics(&mut out, report);
    render_breakdown(&mut out, report);

    let _ = writeln!(
        out,
        "---\n\n*Generated by {} v{}*",
        report.agent_name, report.agent_version
    );
    out
}

fn render_critical(out: &mut String, report: &HealthReport) {
    out.push_str("### Critical Issues\n\n");
    if report.issues.critical.is_empty() {
        out.push_str("No critical issues.\n\n");
        return;
    }
    for issue in &report.issues.critical {
        let _ = writeln!(out, "- [ ] {issue}");
    }
    out.push('\n');
}

fn render_warnings(out: &mut String, report: &HealthReport) {
    out.push_str("### Warnings\n\n");
    let warnings = &report.issues.warnings;
    if warnings.is_empty() {
        out.push_str("No warnings.\n\n");
        return;
    }
    for issue in warnings.iter().take(MAX_WARNINGS_SHOWN) {
        let _ = writeln!(out, "- [ ] {issue}");
    }
    if warnings.len() > MAX_WARNINGS_SHOWN {
        let _ = writeln!(
            out,
            "\n... and {} more warnings",
            warnings.len() - MAX_WARNINGS_SHOWN
        );
    }
    out.push('\n');
}

fn render_passed(out: &mut String, report: &HealthReport) {
    out.push_str("### Passed Checks\n\n");
    let passed = &report.issues.passed;
    if passed.is_empty() {
        out.push_str("No checks passed.\n\n");
        return;
    }
    for issue in passed.iter().take(MAX_PASSED_SHOWN) {
        let _ = writeln!(out, "- [x] {issue}");
    }
    if passed.len() > MAX_PASSED_SHOWN {
        let _ = writeln!(
            out,
            "\n... and {} more checks passed",
            passed.len() - MAX_PASSED_SHOWN
        );
    }
    out.push('\n');
}

fn render_recommendations(out: &mut String, report: &HealthReport) {
    out.push_str("---\n\n### Recommendations\n\n");

    let mut entries = Vec::new();
    if !report.issues.critical.is_empty() {
        entries.push(format!(
            "**High priority**: resolve {} critical issue(s)",
            report.issues.critical.len()
        ));
    }
    if report.issues.warnings.len() > 5 {
        entries.push(format!(
            "**Medium priority**: address {} warning(s)",
            report.issues.warnings.len()
        ));
    }
    if report
        .metrics
        .get("documentation_percentage")
        .copied()
        .unwrap_or(0)
        < 70
    {
        entries.push("**Low priority**: improve project documentation".to_string());
    }

    if entries.is_empty() {
        out.push_str("Project is in excellent shape.\n\n");
        return;
    }
    for (index, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "{}. {entry}", index + 1);
    }
    out.push('\n');
}

fn render_metrics(out: &mut String, report: &HealthReport) {
    out.push_str("---\n\n### Metrics\n\n");
    let _ = writeln!(out, "- **Health Score**: {}/100", report.score());
    let _ = writeln!(
        out,
        "- **Critical Issues**: {}",
        report.issues.critical.len()
    );
    let _ = writeln!(out, "- **Warnings**: {}", report.issues.warnings.len());
    let _ = writeln!(out, "- **Passed Checks**: {}", report.issues.passed.len());

    if let Some(total) = report.metrics.get("total_dependencies") {
        let _ = writeln!(
            out,
            "- **Dependencies**: {total} total ({} prod, {} dev)",
            report.metrics.get("production_dependencies").unwrap_or(&0),
            report.metrics.get("dev_dependencies").unwrap_or(&0)
        );
    }
    if let Some(branches) = report.metrics.get("total_branches") {
        let _ = writeln!(out, "- **Branches**: {branches} local");
    }
    if let Some(workflows) = report.metrics.get("workflow_count") {
        let _ = writeln!(out, "- **CI/CD Workflows**: {workflows}");
    }
    if let Some(percentage) = report.metrics.get("documentation_percentage") {
        let _ = writeln!(out, "- **Documentation Coverage**: {percentage}%");
    }
    if let Some(issues) = report.metrics.get("security_issues") {
        let _ = writeln!(out, "- **Security Issues**: {issues}");
    }
    out.push('\n');
}

fn render_breakdown(out: &mut String, report: &HealthReport) {
    let b = &report.breakdown;
    out.push_str("---\n\n### Scoring Breakdown\n\n```\n");
    let _ = writeln!(out, "File Structure:     {}/{MAX_FILE_STRUCTURE}", b.file_structure);
    let _ = writeln!(out, "Dependencies:       {}/{MAX_DEPENDENCIES}", b.dependencies);
    let _ = writeln!(out, "Git Health:         {}/{MAX_GIT_HEALTH}", b.git_health);
    let _ = writeln!(out, "CI/CD:              {}/{MAX_CI_CD}", b.ci_cd);
    let _ = writeln!(out, "Security:           {}/{MAX_SECURITY}", b.security);
    let _ = writeln!(out, "Documentation:      {}/{MAX_DOCUMENTATION}", b.documentation);
    let _ = writeln!(out, "Test Coverage:      {}/{TEST_BONUS}", b.test_bonus);
    out.push_str("-----------------------------------\n");
    let _ = writeln!(out, "TOTAL:              {}/100", b.total);
    out.push_str("```\n\n");

    out.push_str("**Health Levels**:\n");
    out.push_str("- Excellent: 85-100\n");
    out.push_str("- Good: 70-84\n");
    out.push_str("- Regular: 50-69\n");
    out.push_str("- Critical: <50\n\n");
}
