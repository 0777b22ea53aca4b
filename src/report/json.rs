use super::HealthReport;
use serde_json::json;

/// Machine-readable report: full issue buckets (no display truncation),
/// metrics, the per-category breakdown, and the run timestamp.
pub fn to_json(report: &HealthReport) -> Result<String, serde_json::Error> {
    let doc = json!({
        "score": report.score(),
        "tier": report.breakdown.tier(),
        "timestamp": report.generated_at.to_rfc3339(),
        "repository": report.repository,
        "agent": {
            "name": report.agent_name,
            "version": report.agent_version,
        },
        "breakdown": report.breakdown,
        "issues": report.issues,
        "metrics": report.metrics,
    });
    serde_json::to_string_pretty(&doc)
}
