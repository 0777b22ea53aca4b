use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never descended into: version control and build output.
const EXCLUDED_DIRS: [&str; 2] = [".git", "build"];

/// All regular files under `root`, excluding version-control and build
/// directories, sorted for deterministic results.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn is_excluded_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

pub fn read_to_string_if_exists(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

pub fn file_exists(path: &Path) -> bool {
    path.exists()
}
