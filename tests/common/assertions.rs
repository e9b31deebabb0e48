//! Assertion macros for scenario tests.

use std::path::Path;

/// List all files in a directory recursively (for failure messages)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files.sort();
    files
}

/// Assert that a file exists under the target root.
///
/// # Example
/// ```ignore
/// assert_deployed!(env, "images/logo.png");
/// ```
#[macro_export]
macro_rules! assert_deployed {
    ($env:expr, $path:expr) => {
        let full_path = $env.target_path($path);
        assert!(
            full_path.is_file(),
            "Expected '{}' under the target, but it doesn't exist.\n\
             Files found:\n  {}",
            $path,
            $crate::common::list_all_files($env.target_root.path()).join("\n  ")
        );
    };
}

/// Assert that nothing exists at a path under the target root.
#[macro_export]
macro_rules! assert_not_deployed {
    ($env:expr, $path:expr) => {
        let full_path = $env.target_path($path);
        assert!(
            !full_path.exists(),
            "Expected '{}' to NOT exist under the target, but it does.",
            $path
        );
    };
}
