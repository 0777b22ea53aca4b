pub mod ci_cd;
pub mod dependencies;
pub mod documentation;
pub mod file_structure;
pub mod git_health;
pub mod security;

use crate::types::config::{CheckName, HealthConfig};
use crate::types::report::CheckOutcome;
use std::path::Path;

/// Dispatches one named check. Runners only inspect the tree and the
/// configuration; any internal failure is downgraded to a warning issue, so
/// this never returns an error and no runner can abort the scan.
pub fn run(check: CheckName, root: &Path, config: &HealthConfig) -> CheckOutcome {
    match check {
        CheckName::FileStructure => file_structure::run(root, config),
        CheckName::Dependencies => dependencies::run(root, config),
        CheckName::GitHealth => git_health::run(root, config),
        CheckName::CiCd => ci_cd::run(root, config),
        CheckName::Security => security::run(root, config),
        CheckName::Documentation => documentation::run(root, config),
    }
}
