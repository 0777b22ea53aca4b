pub mod json;
pub mod md;

use crate::error::{HealthError, Result};
use crate::types::report::IssueBuckets;
use crate::types::scoring::ScoreBreakdown;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Display limits for the Markdown rendering; the JSON artifact always
/// carries the full buckets.
pub const MAX_WARNINGS_SHOWN: usize = 15;
pub const MAX_PASSED_SHOWN: usize = 20;

/// Everything the renderers need, assembled once after scoring. Rendering
/// never mutates this.
#[derive(Debug)]
pub struct HealthReport {
    pub breakdown: ScoreBreakdown,
    pub issues: IssueBuckets,
    pub metrics: BTreeMap<String, i64>,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub agent_name: String,
    pub agent_version: String,
}

impl HealthReport {
    pub fn score(&self) -> u32 {
        self.breakdown.total
    }
}

/// Writes the Markdown report and, when requested, the JSON report. Both
/// file names carry the run date so repeated runs on different days do not
/// overwrite each other. Any filesystem failure surfaces as `ReportWrite`.
pub fn write_reports(
    report: &HealthReport,
    output_dir: &Path,
    emit_json: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .map_err(|e| HealthError::ReportWrite(format!("{}: {e}", output_dir.display())))?;

    let day = report.generated_at.format("%Y-%m-%d");
    let md_path = output_dir.join(format!("project-health-report-{day}.md"));
    fs::write(&md_path, md::to_markdown(report))
        .map_err(|e| HealthError::ReportWrite(format!("{}: {e}", md_path.display())))?;

    let mut written = vec![md_path];
    if emit_json {
        let json_path = output_dir.join(format!("health-report-{day}.json"));
        let rendered = json::to_json(report)?;
        fs::write(&json_path, rendered)
            .map_err(|e| HealthError::ReportWrite(format!("{}: {e}", json_path.display())))?;
        written.push(json_path);
    }
    Ok(written)
}

#[cfg(test)]
pub(crate) fn sample_report() -> HealthReport {
    use crate::types::scoring::ScoreBreakdown;

    HealthReport {
        breakdown: ScoreBreakdown {
            file_structure: 20,
            dependencies: 15,
            git_health: 12,
            ci_cd: 7,
            security: 15,
            documentation: 8,
            test_bonus: 0,
            total: 77,
        },
        issues: IssueBuckets {
            critical: vec![],
            warnings: vec!["Missing LICENSE".to_string()],
            passed: vec!["pubspec.yaml exists".to_string()],
        },
        metrics: BTreeMap::from([
            ("workflow_count".to_string(), 1),
            ("documentation_percentage".to_string(), 80),
        ]),
        generated_at: Utc::now(),
        repository: "sample".to_string(),
        agent_name: "Project Structure Health Agent".to_string(),
        agent_version: "1.0.0".to_string(),
    }
}
