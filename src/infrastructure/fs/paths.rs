//! Path normalization for roots read from config or the environment

use std::path::{Component, Path, PathBuf};

/// Absolute form of `path`, taken against `base` when relative.
///
/// `.` and `..` are folded lexically and symlinks are resolved for the
/// longest prefix that exists, so `/srv/www`, `/srv/www/` and a symlink
/// to it all come out the same even before the directory is created.
pub fn normalize_path(base: &Path, path: &Path) -> PathBuf {
    let mut lexical = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(real) = existing.canonicalize() {
            return missing.iter().rev().fold(real, |acc, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }
    lexical
}
