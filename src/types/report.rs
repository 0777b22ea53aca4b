use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Passed,
}

/// A single classified finding. The message is the only payload; severity is
/// the only queryable attribute.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

/// What one check runner produced: its own issues and metrics. Runners never
/// share state; the orchestrator folds outcomes into `ScanResults`.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub issues: Vec<Issue>,
    pub metrics: BTreeMap<String, i64>,
}

impl CheckOutcome {
    pub fn critical(&mut self, message: impl Into<String>) {
        self.issues.push(Issue {
            severity: Severity::Critical,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.issues.push(Issue {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn pass(&mut self, message: impl Into<String>) {
        self.issues.push(Issue {
            severity: Severity::Passed,
            message: message.into(),
        });
    }

    pub fn metric(&mut self, name: &str, value: i64) {
        self.metrics.insert(name.to_string(), value);
    }
}

/// Issues bucketed by severity, in the order the checks emitted them.
#[derive(Debug, Default, Clone, Serialize)]
pub struct IssueBuckets {
    pub critical: Vec<String>,
    pub warnings: Vec<String>,
    pub passed: Vec<String>,
}

impl IssueBuckets {
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Critical => self.critical.push(issue.message),
            Severity::Warning => self.warnings.push(issue.message),
            Severity::Passed => self.passed.push(issue.message),
        }
    }

    pub fn total(&self) -> usize {
        self.critical.len() + self.warnings.len() + self.passed.len()
    }
}

/// Accumulated state of a scan across all enabled checks.
#[derive(Debug, Default)]
pub struct ScanResults {
    pub issues: IssueBuckets,
    pub metrics: BTreeMap<String, i64>,
}

impl ScanResults {
    pub fn merge(&mut self, outcome: CheckOutcome) {
        for issue in outcome.issues {
            self.issues.push(issue);
        }
        self.metrics.extend(outcome.metrics);
    }
}
