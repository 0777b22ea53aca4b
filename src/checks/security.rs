use crate::scan::filesystem::{file_exists, list_files};
use crate::types::config::HealthConfig;
use crate::types::report::CheckOutcome;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Ignore-file patterns every project is expected to carry.
const IGNORE_FILE_PATTERNS: [&str; 5] =
    ["*.key", "*.env", "key.properties", "*.jks", "*.keystore"];

/// File names and extensions that should never be committed.
const SENSITIVE_NAMES: [&str; 2] = [".env", "key.properties"];
const SENSITIVE_EXTENSIONS: [&str; 4] = ["jks", "keystore", "pem", "key"];

/// Source files scanned for credential-looking assignments, bounded for
/// performance.
const MAX_SOURCE_FILES: usize = 20;

/// Heuristic credential patterns. Best-effort text matching only; a match is
/// a warning to investigate, never proof of a leak.
static SUSPICIOUS_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r#"(?i)api[_-]?key\s*=\s*["'][^"']{20,}["']"#, "API key"),
        (r#"(?i)token\s*=\s*["'][^"']{20,}["']"#, "token"),
        (r#"(?i)password\s*=\s*["'][^"']+["']"#, "password"),
        (r#"(?i)secret\s*=\s*["'][^"']{20,}["']"#, "secret"),
    ]
    .into_iter()
    .map(|(pattern, label)| {
        (
            Regex::new(pattern).expect("credential pattern should compile"),
            label,
        )
    })
    .collect()
});

/// Security check: ignore-file coverage, sensitive files in the tree, and a
/// bounded hardcoded-credential scan over Dart sources.
pub fn run(root: &Path, _config: &HealthConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let mut security_issues: i64 = 0;

    check_ignore_file(root, &mut outcome);
    security_issues += check_sensitive_files(root, &mut outcome);
    security_issues += scan_source_files(root, &mut outcome);

    outcome.metric("security_issues", security_issues);
    debug!(security_issues, "security checked");
    outcome
}

fn check_ignore_file(root: &Path, outcome: &mut CheckOutcome) {
    let path = root.join(".gitignore");
    if !file_exists(&path) {
        return;
    }
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            outcome.warn(format!("Failed to read .gitignore: {e}"));
            return;
        }
    };

    let missing: Vec<&str> = IGNORE_FILE_PATTERNS
        .iter()
        .copied()
        .filter(|pattern| !content.contains(*pattern))
        .collect();

    if missing.is_empty() {
        outcome.pass(".gitignore includes security patterns");
    } else {
        outcome.warn(format!(".gitignore does not cover: {}", missing.join(", ")));
    }
}

fn check_sensitive_files(root: &Path, outcome: &mut CheckOutcome) -> i64 {
    let found: Vec<String> = list_files(root)
        .into_iter()
        .filter(|path| is_sensitive(path))
        .map(|path| {
            path.strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    if found.is_empty() {
        outcome.pass("No sensitive files exposed");
        return 0;
    }

    let shown = found
        .iter()
        .take(5)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    outcome.critical(format!("Sensitive files found: {shown}"));
    found.len() as i64
}

fn is_sensitive(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if SENSITIVE_NAMES.contains(&name) {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SENSITIVE_EXTENSIONS.contains(&ext))
}

fn scan_source_files(root: &Path, outcome: &mut CheckOutcome) -> i64 {
    let mut flagged: i64 = 0;
    for file in dart_files(root).into_iter().take(MAX_SOURCE_FILES) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        for (pattern, label) in SUSPICIOUS_PATTERNS.iter() {
            if pattern.is_match(&content) {
                outcome.warn(format!("Possible hardcoded {label} in {name}"));
                flagged += 1;
                break;
            }
        }
    }
    flagged
}

fn dart_files(root: &Path) -> Vec<PathBuf> {
    let lib = root.join("lib");
    if !lib.exists() {
        return Vec::new();
    }
    list_files(&lib)
        .into_iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "dart"))
        .collect()
}
