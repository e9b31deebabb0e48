//! Test environment builder for isolated deploy runs.
//!
//! `TestEnv` owns temp directories for the source tree, the live target,
//! locks and staging. Its `deploy.toml` points the service at `grep` and
//! `true` so no real web server is needed.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use super::fixtures::{CONFIG_DEST, INDEX_HTML, LOGO_PNG, SITE_CONF, USER_SVG};

/// Result of running the deploy binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// stdout parsed as NDJSON
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not NDJSON ({e}): {l}"))
            })
            .collect()
    }

    /// Names of the NDJSON events, in order
    pub fn event_names(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|e| e["event"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

/// Isolated source tree, target and state directories
pub struct TestEnv {
    pub source_root: TempDir,
    pub target_root: TempDir,
    /// Lock files, staging areas and a fake HOME
    pub state_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// A source tree with the full portal and a valid config
    pub fn portal() -> Self {
        let env = Self::empty();
        env.write_source("index.html", INDEX_HTML);
        env.write_source_bytes("images/logo.png", LOGO_PNG);
        env.write_source("images/icons/user.svg", USER_SVG);
        env.write_source("nginx/admin-portal.conf", SITE_CONF);
        env.write_source("README.md", "# admin portal\n");
        env
    }

    /// Only `deploy.toml`, no portal files
    pub fn empty() -> Self {
        let env = Self {
            source_root: TempDir::new().expect("source dir"),
            target_root: TempDir::new().expect("target dir"),
            state_dir: TempDir::new().expect("state dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_deploy")),
        };
        std::fs::create_dir_all(env.state_path("locks")).expect("locks dir");
        std::fs::create_dir_all(env.state_path("staging")).expect("staging dir");
        std::fs::create_dir_all(env.state_path("home")).expect("home dir");
        env.write_source(
            "deploy.toml",
            &deploy_toml(
                env.target_root.path(),
                &env.state_path("locks"),
                &env.state_path("staging"),
            ),
        );
        env
    }

    pub fn source_path(&self, relative: &str) -> PathBuf {
        self.source_root.path().join(relative)
    }

    pub fn target_path(&self, relative: &str) -> PathBuf {
        self.target_root.path().join(relative)
    }

    pub fn state_path(&self, relative: &str) -> PathBuf {
        self.state_dir.path().join(relative)
    }

    pub fn write_source(&self, relative: &str, content: &str) {
        self.write_source_bytes(relative, content.as_bytes());
    }

    pub fn write_source_bytes(&self, relative: &str, content: &[u8]) {
        write_file(&self.source_path(relative), content);
    }

    pub fn write_target(&self, relative: &str, content: &str) {
        write_file(&self.target_path(relative), content.as_bytes());
    }

    pub fn read_target(&self, relative: &str) -> String {
        std::fs::read_to_string(self.target_path(relative))
            .unwrap_or_else(|e| panic!("failed to read deployed file {relative}: {e}"))
    }

    /// The live config path
    pub fn config_dest(&self) -> PathBuf {
        self.target_path(CONFIG_DEST)
    }

    /// Files under the staging parent (should be empty after every run)
    pub fn staging_leftovers(&self) -> Vec<String> {
        super::list_all_files(&self.state_path("staging"))
    }

    /// Run `deploy` from the source root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.source_root.path())
            .args(args)
            .stdin(Stdio::null())
            .env("HOME", self.state_path("home"))
            .env("XDG_CONFIG_HOME", self.state_path("home/.config"))
            .env("NO_COLOR", "1")
            .env_remove("SKIP_DEPLOY")
            .env_remove("STAGEHAND_TARGET_ROOT")
            .env_remove("STAGEHAND_DELAY")
            .env_remove("STAGEHAND_LOCK_DIR");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute deploy");
        output_to_result(output)
    }
}

fn deploy_toml(target: &Path, locks: &Path, staging: &Path) -> String {
    format!(
        r#"[layout]
target_root = "{target}"
assets = ["index.html", "images"]

[service]
name = "nginx"
config_source = "nginx/admin-portal.conf"
config_dest = "{dest}"
test_command = "grep -q server {{config}}"
reload_command = "true"
config_owner = ""
config_mode = "644"

[permissions]
owner = ""
group = ""
file_mode = "644"
dir_mode = "755"

[trigger]
delay_secs = 0

[lock]
dir = "{locks}"

[staging]
dir = "{staging}"
"#,
        target = target.display(),
        dest = CONFIG_DEST,
        locks = locks.display(),
        staging = staging.display(),
    )
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create directories");
    }
    std::fs::write(path, content).expect("failed to write file");
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
