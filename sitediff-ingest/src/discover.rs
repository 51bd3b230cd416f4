use std::fs;
use std::path::Path;
use tracing::warn;

/// List file names in `dir` that start with `prefix` and end with `suffix`, sorted.
///
/// A missing directory lists as empty.
pub fn list_files(dir: &Path, prefix: &str, suffix: &str) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if dir.exists() {
                warn!("Cannot list {}: {}", dir.display(), e);
            }
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(prefix) && name.ends_with(suffix))
        .collect();
    names.sort();
    names
}
