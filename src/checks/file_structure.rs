use crate::scan::filesystem::file_exists;
use crate::types::config::HealthConfig;
use crate::types::report::CheckOutcome;
use std::path::Path;
use tracing::debug;

/// Structural check: project-type critical files, the general trio
/// (README/LICENSE/.gitignore), and the executable bit on shell scripts.
pub fn run(root: &Path, config: &HealthConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    for relative in config.critical_files_for_type() {
        if file_exists(&root.join(relative)) {
            outcome.pass(format!("{relative} exists"));
        } else {
            outcome.critical(format!("Missing critical file: {relative}"));
        }
    }

    for name in ["README.md", "LICENSE", ".gitignore"] {
        if file_exists(&root.join(name)) {
            outcome.pass(format!("{name} present"));
        } else if name == "README.md" {
            outcome.critical(format!("Missing {name}"));
        } else {
            outcome.warn(format!("Missing {name}"));
        }
    }

    check_script_permissions(root, &mut outcome);

    debug!(issues = outcome.issues.len(), "file structure checked");
    outcome
}

fn check_script_permissions(root: &Path, outcome: &mut CheckOutcome) {
    let scripts_dir = root.join("scripts");
    let Ok(entries) = std::fs::read_dir(&scripts_dir) else {
        return;
    };

    let mut scripts: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "sh"))
        .collect();
    scripts.sort();

    for script in scripts {
        let name = script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if is_executable(&script) {
            outcome.pass(format!("{name} is executable"));
        } else {
            outcome.warn(format!("{name} is not executable"));
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::Severity;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_critical_files_and_readme_are_critical() {
        let dir = TempDir::new().expect("temp dir should be created");
        let outcome = run(dir.path(), &HealthConfig::default());

        let critical: Vec<_> = outcome
            .issues
            .iter()
            .filter(|issue| issue.severity == Severity::Critical)
            .map(|issue| issue.message.as_str())
            .collect();
        assert!(critical.contains(&"Missing critical file: pubspec.yaml"));
        assert!(critical.contains(&"Missing critical file: lib/main.dart"));
        assert!(critical.contains(&"Missing README.md"));
    }

    #[test]
    fn complete_tree_passes_all_structure_checks() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("lib")).expect("lib should create");
        fs::write(dir.path().join("pubspec.yaml"), "name: app").expect("pubspec should write");
        fs::write(dir.path().join("lib/main.dart"), "void main() {}")
            .expect("main.dart should write");
        fs::write(dir.path().join("README.md"), "# App").expect("readme should write");
        fs::write(dir.path().join("LICENSE"), "MIT").expect("license should write");
        fs::write(dir.path().join(".gitignore"), "build/").expect("gitignore should write");

        let outcome = run(dir.path(), &HealthConfig::default());
        assert!(outcome
            .issues
            .iter()
            .all(|issue| issue.severity == Severity::Passed));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_shell_script_is_a_warning() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("scripts")).expect("scripts should create");
        let script = dir.path().join("scripts/deploy.sh");
        fs::write(&script, "#!/bin/sh\n").expect("script should write");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o644))
            .expect("permissions should set");

        let outcome = run(dir.path(), &HealthConfig::default());
        assert!(outcome.issues.iter().any(|issue| {
            issue.severity == Severity::Warning && issue.message == "deploy.sh is not executable"
        }));
    }
}
