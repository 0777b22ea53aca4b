use crate::error::{HealthError, Result};
use crate::types::config::{AgentInfo, ChecksConfig, HealthConfig, Thresholds};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = ".project-health.yml";

const RECOGNIZED_KEYS: [&str; 6] = [
    "agent",
    "checks",
    "thresholds",
    "project_type",
    "critical_files",
    "ignore_patterns",
];

/// Override document: only recognized top-level keys, all optional. A key
/// that is present replaces the corresponding default wholesale (shallow
/// merge).
#[derive(Debug, Default, Deserialize)]
struct OverrideDoc {
    agent: Option<AgentInfo>,
    checks: Option<ChecksConfig>,
    thresholds: Option<Thresholds>,
    project_type: Option<String>,
    critical_files: Option<BTreeMap<String, Vec<String>>>,
    ignore_patterns: Option<Vec<String>>,
}

/// Builds the run configuration: defaults, shallow-overwritten by the
/// override file when present and parseable. A parse failure is reported on
/// stderr and degrades to defaults; it never aborts the scan.
pub fn load_config(override_path: &Path) -> HealthConfig {
    let mut config = HealthConfig::default();
    if !override_path.exists() {
        return config;
    }

    match parse_override(override_path) {
        Ok(doc) => apply_override(&mut config, doc),
        Err(e) => eprintln!("warning: {e}; using default configuration"),
    }
    config
}

fn parse_override(path: &Path) -> Result<OverrideDoc> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_yaml::Value = serde_yaml::from_str(&content)
        .map_err(|e| HealthError::ConfigParse(format!("{}: {}", path.display(), e)))?;

    if let serde_yaml::Value::Mapping(mapping) = &value {
        for key in mapping.keys() {
            if let Some(name) = key.as_str() {
                if !RECOGNIZED_KEYS.contains(&name) {
                    warn!(key = name, "ignoring unrecognized configuration key");
                }
            }
        }
    }

    serde_yaml::from_value(value)
        .map_err(|e| HealthError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn apply_override(config: &mut HealthConfig, doc: OverrideDoc) {
    if let Some(agent) = doc.agent {
        config.agent = agent;
    }
    if let Some(checks) = doc.checks {
        config.checks = checks;
    }
    if let Some(thresholds) = doc.thresholds {
        config.thresholds = thresholds;
    }
    if let Some(project_type) = doc.project_type {
        config.project_type = project_type;
    }
    if let Some(critical_files) = doc.critical_files {
        config.critical_files = critical_files;
    }
    if let Some(ignore_patterns) = doc.ignore_patterns {
        config.ignore_patterns = ignore_patterns;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::CheckName;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_uses_defaults_when_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let config = load_config(&dir.path().join(DEFAULT_CONFIG_FILE));
        assert_eq!(config.project_type, "flutter");
        assert_eq!(config.checks.enabled, CheckName::all().to_vec());
    }

    #[test]
    fn load_config_shallow_overwrites_present_keys() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"
project_type: android
thresholds:
  max_stale_branches: 2
critical_files:
  android:
    - build.gradle
    - app/src/main/AndroidManifest.xml
"#,
        )
        .expect("override should write");

        let config = load_config(&path);
        assert_eq!(config.project_type, "android");
        assert_eq!(config.thresholds.max_stale_branches, 2);
        assert_eq!(
            config.critical_files_for_type(),
            [
                "build.gradle".to_string(),
                "app/src/main/AndroidManifest.xml".to_string()
            ]
        );
        // keys absent from the override keep their defaults
        assert_eq!(config.checks.enabled.len(), 6);
        assert_eq!(config.ignore_patterns.len(), 3);
    }

    #[test]
    fn load_config_falls_back_to_defaults_on_parse_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, ": not [ yaml").expect("broken override should write");

        let config = load_config(&path);
        assert_eq!(config.project_type, "flutter");
    }

    #[test]
    fn load_config_accepts_unrecognized_keys() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"
project_type: flutter
made_up_section:
  anything: true
"#,
        )
        .expect("override should write");

        let config = load_config(&path);
        assert_eq!(config.project_type, "flutter");
    }
}
