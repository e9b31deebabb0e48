//! `install-hook` writes a post-commit hook that calls back into deploy.

mod common;

use std::process::Command;

use common::*;

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git_init(dir: &std::path::Path) {
    let status = Command::new("git")
        .args(["init", "-q"])
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn install_hook_writes_executable_post_commit() {
    if !git_available() {
        return;
    }
    let env = TestEnv::portal();
    git_init(env.source_root.path());

    let result = env.run(&["install-hook"]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    let hook = env.source_path(".git/hooks/post-commit");
    let script = std::fs::read_to_string(&hook).unwrap();
    assert!(script.starts_with("#!/bin/sh"));
    assert!(script.contains("post-commit"));
    assert!(script.contains("SKIP_DEPLOY"));
    assert!(result.stdout.contains("Post-commit hook installed"), "{}", result.stdout);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&hook).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn install_hook_refuses_foreign_hook_without_overwrite() {
    if !git_available() {
        return;
    }
    let env = TestEnv::portal();
    git_init(env.source_root.path());
    let hook = env.source_path(".git/hooks/post-commit");
    std::fs::create_dir_all(hook.parent().unwrap()).unwrap();
    std::fs::write(&hook, "#!/bin/sh\necho mine\n").unwrap();

    let refused = env.run(&["install-hook"]);
    assert_eq!(refused.exit_code, 1, "{}", refused.combined_output());
    assert!(refused.stderr.contains("--overwrite"), "{}", refused.stderr);
    assert_eq!(
        std::fs::read_to_string(&hook).unwrap(),
        "#!/bin/sh\necho mine\n"
    );

    let replaced = env.run(&["--json", "install-hook", "--overwrite"]);
    assert_eq!(replaced.exit_code, 0, "{}", replaced.combined_output());
    let events = replaced.events();
    assert_eq!(events[0]["event"], "hook_installed");
    assert_eq!(events[0]["replaced"], true);
}

#[test]
fn install_hook_outside_a_repository_fails() {
    if !git_available() {
        return;
    }
    let env = TestEnv::portal();
    let outside = tempfile::TempDir::new().unwrap();

    let result = env.run(&["install-hook", "--repo", outside.path().to_str().unwrap()]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
}
