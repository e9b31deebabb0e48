//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StagehandError, StagehandResult};

pub use crate::domain::value_objects::ConfigWarning;

use super::types::Config;

/// Config file looked up in the source root
pub const CONFIG_FILE_NAME: &str = "deploy.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StagehandResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StagehandError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Explicit file, then `<source>/deploy.toml`, then the user config, then
/// defaults. A file that exists but does not parse is an error. Relative
/// roots in the result are resolved against `source_root`.
pub fn load_for_source(
    source_root: &Path,
    explicit: Option<&Path>,
) -> StagehandResult<(Config, Vec<ConfigWarning>)> {
    let candidates: Vec<PathBuf> = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => std::iter::once(source_root.join(CONFIG_FILE_NAME))
            .chain(user_config_path())
            .collect(),
    };

    for candidate in candidates {
        if explicit.is_some() || candidate.exists() {
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok((with_env_overrides(config).resolve_paths(source_root), warnings));
        }
    }

    Ok((
        with_env_overrides(Config::default()).resolve_paths(source_root),
        Vec::new(),
    ))
}

/// Apply environment variable overrides (STAGEHAND_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

pub(super) fn with_overrides_from(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    // STAGEHAND_TARGET_ROOT
    if let Some(root) = get_env("STAGEHAND_TARGET_ROOT").filter(|v| !v.is_empty()) {
        config.layout.target_root = PathBuf::from(root);
    }

    // STAGEHAND_DELAY (seconds)
    if let Some(delay) = get_env("STAGEHAND_DELAY").and_then(|v| v.trim().parse().ok()) {
        config.trigger.delay_secs = delay;
    }

    // STAGEHAND_LOCK_DIR
    if let Some(dir) = get_env("STAGEHAND_LOCK_DIR").filter(|v| !v.is_empty()) {
        config.lock.dir = Some(PathBuf::from(dir));
    }

    config
}

/// `~/.config/stagehand/deploy.toml` (platform equivalent)
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stagehand").join(CONFIG_FILE_NAME))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "layout",
        "target_root",
        "assets",
        "path",
        "required",
        "service",
        "name",
        "config_source",
        "config_dest",
        "config_owner",
        "config_group",
        "config_mode",
        "test_command",
        "reload_command",
        "requires_reload",
        "permissions",
        "owner",
        "group",
        "file_mode",
        "dir_mode",
        "trigger",
        "delay_secs",
        "lock",
        "dir",
        "staging",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
