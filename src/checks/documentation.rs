use crate::scan::filesystem::file_exists;
use crate::types::config::HealthConfig;
use crate::types::report::CheckOutcome;
use std::path::Path;
use tracing::debug;

/// README topic keywords, matched against the lowercased content.
const README_SECTIONS: [(&str, &str); 4] = [
    ("install", "installation section"),
    ("usage", "usage section"),
    ("contribut", "contributing guide"),
    ("licen", "license information"),
];

/// Supplementary documents counted toward documentation coverage.
const DOC_FILES: [(&str, &str); 4] = [
    ("CHANGELOG.md", "changelog"),
    ("CONTRIBUTING.md", "contributing guide"),
    ("LICENSE", "license"),
    ("SECURITY.md", "security policy"),
];

/// Documentation check: README topics and badge marker, supplementary docs,
/// and a populated docs directory. Produces the coverage percentage the
/// score calculator consumes.
pub fn run(root: &Path, _config: &HealthConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let mut docs_score: i64 = 0;
    let mut total_checks: i64 = 0;

    check_readme(root, &mut outcome, &mut docs_score, &mut total_checks);

    for (name, description) in DOC_FILES {
        total_checks += 1;
        if file_exists(&root.join(name)) {
            outcome.pass(format!("{description} present"));
            docs_score += 1;
        } else {
            outcome.warn(format!("Missing {description}"));
        }
    }

    let docs_dir = root.join("docs");
    total_checks += 1;
    if docs_dir.is_dir() {
        let documents = markdown_count(&docs_dir);
        if documents > 0 {
            outcome.pass(format!("{documents} document(s) in /docs"));
            docs_score += 1;
        }
    } else {
        outcome.warn("No /docs directory");
    }

    let percentage = if total_checks > 0 {
        docs_score * 100 / total_checks
    } else {
        0
    };
    outcome.metric("documentation_score", docs_score);
    outcome.metric("documentation_total", total_checks);
    outcome.metric("documentation_percentage", percentage);

    debug!(percentage, "documentation checked");
    outcome
}

fn check_readme(
    root: &Path,
    outcome: &mut CheckOutcome,
    docs_score: &mut i64,
    total_checks: &mut i64,
) {
    let readme_path = root.join("README.md");
    if !file_exists(&readme_path) {
        // the five README checks all count as missed
        *total_checks += 5;
        outcome.critical("README.md does not exist");
        return;
    }

    let content = match std::fs::read_to_string(&readme_path) {
        Ok(content) => content.to_lowercase(),
        Err(e) => {
            outcome.warn(format!("Failed to read README: {e}"));
            return;
        }
    };

    for (keyword, description) in README_SECTIONS {
        *total_checks += 1;
        if content.contains(keyword) {
            outcome.pass(format!("README contains {description}"));
            *docs_score += 1;
        } else {
            outcome.warn(format!("README missing {description}"));
        }
    }

    *total_checks += 1;
    if content.contains("![") || content.contains("badge") {
        outcome.pass("README contains badges");
        *docs_score += 1;
    } else {
        outcome.warn("README has no badges");
    }
}

fn markdown_count(docs_dir: &Path) -> usize {
    std::fs::read_dir(docs_dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| {
                    entry
                        .path()
                        .extension()
                        .is_some_and(|ext| ext == "md")
                })
                .count()
        })
        .unwrap_or(0)
}
