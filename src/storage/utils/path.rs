// Path helper utilities shared across storage operations
use std::path::{Path, PathBuf};

/// Extract a normalized basename from a local or remote path.
pub fn basename(path: &str) -> String {
    Path::new(path.trim_start_matches('/'))
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.trim_matches('/').to_string())
}

/// Directory to list when looking for keys under `prefix`: everything up to the last '/'.
pub fn listing_root(prefix: &str) -> &str {
    let prefix = prefix.trim_start_matches('/');
    match prefix.rfind('/') {
        Some(idx) => &prefix[..=idx],
        None => "/",
    }
}

/// Whether an object key (as reported by a lister) falls under `prefix`.
pub fn key_has_prefix(key: &str, prefix: &str) -> bool {
    key.trim_start_matches('/')
        .starts_with(prefix.trim_start_matches('/'))
}

/// The outermost ancestor of `dir` that does not exist yet, if any.
///
/// Removing it undoes a `create_dir_all(dir)`.
pub fn first_missing_ancestor(dir: &Path) -> Option<PathBuf> {
    let mut missing = None;
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() || ancestor.exists() {
            break;
        }
        missing = Some(ancestor.to_path_buf());
    }
    missing
}
