//! Git integration
//!
//! The post-commit trigger learns what changed from the commit that just
//! landed, and `install-hook` wires the trigger into a repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{StagehandError, StagehandResult};

/// Marker line identifying hooks this tool wrote
pub const HOOK_MARKER: &str = "# installed by stagehand";

/// Result of installing the post-commit hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInstall {
    pub path: PathBuf,
    /// A previous hook was replaced
    pub replaced: bool,
}

/// Paths touched by `HEAD`, relative to the repository root
pub fn changed_paths(repo: &Path) -> StagehandResult<Vec<PathBuf>> {
    let output = git(
        repo,
        &["diff-tree", "--no-commit-id", "--name-only", "-r", "--root", "HEAD"],
    )?;
    Ok(output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Top-level directory of the repository containing `dir`
pub fn repo_root(dir: &Path) -> StagehandResult<PathBuf> {
    let output = git(dir, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(output.trim()))
}

/// Install the post-commit hook into the repository at `repo`
pub fn install_hook(repo: &Path, program: &Path, overwrite: bool) -> StagehandResult<HookInstall> {
    let hooks = git(repo, &["rev-parse", "--git-path", "hooks"])?;
    let hooks = repo.join(hooks.trim());
    install_hook_in(&hooks, program, overwrite)
}

/// Write `post-commit` into `hooks_dir`.
///
/// A hook without our marker is only replaced with `overwrite`.
pub fn install_hook_in(
    hooks_dir: &Path,
    program: &Path,
    overwrite: bool,
) -> StagehandResult<HookInstall> {
    let path = hooks_dir.join("post-commit");
    let existing = fs::read_to_string(&path).ok();

    if let Some(content) = &existing {
        if !content.contains(HOOK_MARKER) && !overwrite {
            return Err(StagehandError::ForeignHook { path });
        }
    }

    fs::create_dir_all(hooks_dir)?;
    fs::write(&path, hook_script(program))?;
    make_executable(&path)?;

    Ok(HookInstall {
        path,
        replaced: existing.is_some(),
    })
}

fn hook_script(program: &Path) -> String {
    format!(
        "#!/bin/sh\n{HOOK_MARKER}\n# Deploys after every commit. Set SKIP_DEPLOY=1 to skip once.\nexec \"{}\" post-commit\n",
        program.display()
    )
}

#[cfg(unix)]
fn make_executable(path: &Path) -> StagehandResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> StagehandResult<()> {
    Ok(())
}

fn git(dir: &Path, args: &[&str]) -> StagehandResult<String> {
    let command = args.first().copied().unwrap_or_default().to_string();
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| StagehandError::Git {
            command: command.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(StagehandError::Git {
            command,
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn run_git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_NAME", "t")
            .env("GIT_AUTHOR_EMAIL", "t@example.com")
            .env("GIT_COMMITTER_NAME", "t")
            .env("GIT_COMMITTER_EMAIL", "t@example.com")
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    #[test]
    fn installs_hook_with_marker() {
        let dir = tempdir().unwrap();
        let hooks = dir.path().join("hooks");

        let installed = install_hook_in(&hooks, Path::new("/usr/local/bin/deploy"), false).unwrap();

        assert!(!installed.replaced);
        let script = fs::read_to_string(&installed.path).unwrap();
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(HOOK_MARKER));
        assert!(script.contains("exec \"/usr/local/bin/deploy\" post-commit"));
    }

    #[test]
    fn refuses_foreign_hook_without_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("post-commit"), "#!/bin/sh\nmake test\n").unwrap();

        let err = install_hook_in(dir.path(), Path::new("deploy"), false).unwrap_err();
        assert!(matches!(err, StagehandError::ForeignHook { .. }));

        let installed = install_hook_in(dir.path(), Path::new("deploy"), true).unwrap();
        assert!(installed.replaced);
    }

    #[test]
    fn reinstall_over_own_hook_needs_no_overwrite() {
        let dir = tempdir().unwrap();
        install_hook_in(dir.path(), Path::new("deploy"), false).unwrap();
        assert!(install_hook_in(dir.path(), Path::new("deploy"), false)
            .unwrap()
            .replaced);
    }

    #[test]
    fn changed_paths_lists_files_of_head() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        run_git(dir.path(), &["init", "-q"]);
        fs::create_dir(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("README.md"), "readme").unwrap();
        run_git(dir.path(), &["add", "."]);
        run_git(dir.path(), &["commit", "-q", "-m", "first"]);
        fs::write(dir.path().join("images/logo.png"), "png").unwrap();
        run_git(dir.path(), &["add", "."]);
        run_git(dir.path(), &["commit", "-q", "-m", "second"]);

        assert_eq!(
            changed_paths(dir.path()).unwrap(),
            vec![PathBuf::from("images/logo.png")]
        );
    }
}
