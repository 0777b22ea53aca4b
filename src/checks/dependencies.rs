use crate::scan::filesystem::read_to_string_if_exists;
use crate::types::config::HealthConfig;
use crate::types::report::CheckOutcome;
use std::path::Path;
use tracing::debug;

/// Known-deprecated pub packages and their suggested replacements.
const DEPRECATED_PACKAGES: [(&str, &str); 1] = [("charts_flutter", "use fl_chart instead")];

/// Manifest check: parses pubspec.yaml, records dependency counts, and flags
/// deny-listed packages.
pub fn run(root: &Path, _config: &HealthConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    let manifest_path = root.join("pubspec.yaml");
    let Some(content) = read_to_string_if_exists(&manifest_path) else {
        outcome.warn("pubspec.yaml not found");
        return outcome;
    };

    let manifest: serde_yaml::Value = match serde_yaml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            outcome.warn(format!("Failed to parse pubspec.yaml: {e}"));
            return outcome;
        }
    };

    let deps = section_keys(&manifest, "dependencies");
    let dev_deps = section_keys(&manifest, "dev_dependencies");
    let total = deps.len() + dev_deps.len();

    outcome.metric("total_dependencies", total as i64);
    outcome.metric("production_dependencies", deps.len() as i64);
    outcome.metric("dev_dependencies", dev_deps.len() as i64);
    outcome.pass(format!("pubspec.yaml valid with {total} dependencies"));

    for name in &deps {
        if let Some((_, advice)) = DEPRECATED_PACKAGES
            .iter()
            .find(|(deprecated, _)| *deprecated == name.as_str())
        {
            outcome.warn(format!("Deprecated dependency: {name} - {advice}"));
        }
    }

    debug!(total, "dependencies checked");
    outcome
}

fn section_keys(manifest: &serde_yaml::Value, section: &str) -> Vec<String> {
    manifest
        .get(section)
        .and_then(|value| value.as_mapping())
        .map(|mapping| {
            mapping
                .keys()
                .filter_map(|key| key.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::Severity;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_is_a_warning() {
        let dir = TempDir::new().expect("temp dir should be created");
        let outcome = run(dir.path(), &HealthConfig::default());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].severity, Severity::Warning);
        assert!(outcome.metrics.is_empty());
    }

    #[test]
    fn valid_manifest_records_counts_and_passes() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("pubspec.yaml"),
            r#"
name: app
dependencies:
  http: ^1.0.0
  provider: ^6.0.0
dev_dependencies:
  flutter_test:
    sdk: flutter
"#,
        )
        .expect("pubspec should write");

        let outcome = run(dir.path(), &HealthConfig::default());
        assert_eq!(outcome.metrics.get("total_dependencies"), Some(&3));
        assert_eq!(outcome.metrics.get("production_dependencies"), Some(&2));
        assert_eq!(outcome.metrics.get("dev_dependencies"), Some(&1));
        assert!(outcome.issues.iter().any(|issue| {
            issue.severity == Severity::Passed
                && issue.message == "pubspec.yaml valid with 3 dependencies"
        }));
    }

    #[test]
    fn deprecated_dependency_is_flagged() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("pubspec.yaml"),
            "dependencies:\n  charts_flutter: ^0.12.0\n",
        )
        .expect("pubspec should write");

        let outcome = run(dir.path(), &HealthConfig::default());
        assert!(outcome.issues.iter().any(|issue| {
            issue.severity == Severity::Warning
                && issue.message.contains("Deprecated dependency: charts_flutter")
        }));
    }

    #[test]
    fn unparseable_manifest_downgrades_to_warning() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("pubspec.yaml"), "dependencies: [unclosed")
            .expect("pubspec should write");

        let outcome = run(dir.path(), &HealthConfig::default());
        assert!(outcome.issues.iter().any(|issue| {
            issue.severity == Severity::Warning
                && issue.message.starts_with("Failed to parse pubspec.yaml")
        }));
    }
}
