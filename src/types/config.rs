use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The six inspection routines. Order in `checks.enabled` is the execution
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    FileStructure,
    Dependencies,
    GitHealth,
    CiCd,
    Security,
    Documentation,
}

impl CheckName {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckName::FileStructure => "file_structure",
            CheckName::Dependencies => "dependencies",
            CheckName::GitHealth => "git_health",
            CheckName::CiCd => "ci_cd",
            CheckName::Security => "security",
            CheckName::Documentation => "documentation",
        }
    }

    pub fn all() -> [CheckName; 6] {
        [
            CheckName::FileStructure,
            CheckName::Dependencies,
            CheckName::GitHealth,
            CheckName::CiCd,
            CheckName::Security,
            CheckName::Documentation,
        ]
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "file_structure" => Ok(CheckName::FileStructure),
            "dependencies" => Ok(CheckName::Dependencies),
            "git_health" => Ok(CheckName::GitHealth),
            "ci_cd" => Ok(CheckName::CiCd),
            "security" => Ok(CheckName::Security),
            "documentation" => Ok(CheckName::Documentation),
            other => Err(format!("unknown check name: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentInfo {
    pub name: String,
    pub version: String,
}

impl Default for AgentInfo {
    fn default() -> Self {
        Self {
            name: "Project Structure Health Agent".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    pub enabled: Vec<CheckName>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            enabled: CheckName::all().to_vec(),
        }
    }
}

/// Numeric limits. Only `max_stale_branches` feeds a check today; the rest
/// are accepted so existing override files keep parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub max_open_prs: u32,
    pub max_pr_age_days: u32,
    pub max_stale_branches: usize,
    pub min_test_coverage: u32,
    pub max_outdated_dependencies: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_open_prs: 10,
            max_pr_age_days: 30,
            max_stale_branches: 5,
            min_test_coverage: 70,
            max_outdated_dependencies: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub agent: AgentInfo,
    pub checks: ChecksConfig,
    pub thresholds: Thresholds,
    pub project_type: String,
    pub critical_files: BTreeMap<String, Vec<String>>,
    pub ignore_patterns: Vec<String>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        let mut critical_files = BTreeMap::new();
        critical_files.insert(
            "flutter".to_string(),
            vec!["pubspec.yaml".to_string(), "lib/main.dart".to_string()],
        );
        Self {
            agent: AgentInfo::default(),
            checks: ChecksConfig::default(),
            thresholds: Thresholds::default(),
            project_type: "flutter".to_string(),
            critical_files,
            ignore_patterns: vec![
                "build/".to_string(),
                ".dart_tool/".to_string(),
                "*.g.dart".to_string(),
            ],
        }
    }
}

impl HealthConfig {
    /// Critical files for the configured project type; empty when the type
    /// has no entry.
    pub fn critical_files_for_type(&self) -> &[String] {
        self.critical_files
            .get(&self.project_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
