//! Deployment unit entities
//!
//! A `DeploymentUnit` is built fresh for every run by the manifest resolver
//! and never persisted. Destinations are unique within a unit.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::DeployScope;

/// What a file is to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Web content served as-is
    Asset,
    /// Configuration consumed by the external service
    Config,
}

/// One source → destination copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path in the working tree
    pub source: PathBuf,
    /// Absolute live path
    pub dest: PathBuf,
    /// Path relative to the source root (what change-sets refer to)
    pub relative: PathBuf,
    pub kind: FileKind,
}

impl FileEntry {
    pub fn asset(source_root: &Path, target_root: &Path, relative: impl Into<PathBuf>) -> Self {
        let relative = relative.into();
        Self {
            source: source_root.join(&relative),
            dest: target_root.join(&relative),
            relative,
            kind: FileKind::Asset,
        }
    }

    /// Whether the soft markup check applies to this file
    pub fn is_markup(&self) -> bool {
        self.kind == FileKind::Asset
            && self
                .source
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
    }
}

/// The unit's single service configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub entry: FileEntry,
    /// Which external service owns this config (e.g. `nginx`)
    pub service: String,
    pub requires_reload: bool,
}

/// Ordered files plus at most one config entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentUnit {
    files: Vec<FileEntry>,
    config: Option<ConfigEntry>,
}

impl DeploymentUnit {
    /// Build a unit, rejecting two entries with the same destination.
    ///
    /// Returns the first duplicated destination on collision.
    pub fn new(files: Vec<FileEntry>, config: Option<ConfigEntry>) -> Result<Self, PathBuf> {
        let mut seen = HashSet::new();
        let all = files.iter().chain(config.as_ref().map(|c| &c.entry));
        for entry in all {
            if !seen.insert(entry.dest.as_path()) {
                return Err(entry.dest.clone());
            }
        }
        Ok(Self { files, config })
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn config(&self) -> Option<&ConfigEntry> {
        self.config.as_ref()
    }

    /// All entries in manifest order: assets first, then the config
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.files
            .iter()
            .chain(self.config.as_ref().map(|c| &c.entry))
    }

    pub fn len(&self) -> usize {
        self.files.len() + usize::from(self.config.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn scope(&self) -> Option<DeployScope> {
        DeployScope::from_parts(!self.files.is_empty(), self.config.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots() -> (PathBuf, PathBuf) {
        (PathBuf::from("/repo"), PathBuf::from("/srv/www"))
    }

    #[test]
    fn asset_entry_mirrors_relative_path() {
        let (src, dst) = roots();
        let entry = FileEntry::asset(&src, &dst, "images/logo.png");
        assert_eq!(entry.source, PathBuf::from("/repo/images/logo.png"));
        assert_eq!(entry.dest, PathBuf::from("/srv/www/images/logo.png"));
        assert!(!entry.is_markup());
    }

    #[test]
    fn html_assets_are_markup() {
        let (src, dst) = roots();
        assert!(FileEntry::asset(&src, &dst, "index.html").is_markup());
        assert!(FileEntry::asset(&src, &dst, "legacy/Page.HTM").is_markup());
    }

    #[test]
    fn duplicate_destinations_are_rejected() {
        let (src, dst) = roots();
        let a = FileEntry::asset(&src, &dst, "index.html");
        let b = a.clone();
        assert_eq!(
            DeploymentUnit::new(vec![a, b], None),
            Err(PathBuf::from("/srv/www/index.html"))
        );
    }

    #[test]
    fn config_collision_with_asset_is_rejected() {
        let (src, dst) = roots();
        let asset = FileEntry::asset(&src, &dst, "site.conf");
        let config = ConfigEntry {
            entry: FileEntry {
                kind: FileKind::Config,
                ..asset.clone()
            },
            service: "nginx".into(),
            requires_reload: true,
        };
        assert!(DeploymentUnit::new(vec![asset], Some(config)).is_err());
    }

    #[test]
    fn entries_put_config_last() {
        let (src, dst) = roots();
        let config = ConfigEntry {
            entry: FileEntry {
                source: src.join("nginx/site.conf"),
                dest: PathBuf::from("/etc/nginx/sites-available/site"),
                relative: PathBuf::from("nginx/site.conf"),
                kind: FileKind::Config,
            },
            service: "nginx".into(),
            requires_reload: true,
        };
        let unit = DeploymentUnit::new(
            vec![FileEntry::asset(&src, &dst, "index.html")],
            Some(config),
        )
        .unwrap();

        let kinds: Vec<FileKind> = unit.entries().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![FileKind::Asset, FileKind::Config]);
        assert_eq!(unit.len(), 2);
        assert_eq!(unit.scope(), Some(DeployScope::Full));
    }

    #[test]
    fn empty_unit_has_no_scope() {
        let unit = DeploymentUnit::default();
        assert!(unit.is_empty());
        assert_eq!(unit.scope(), None);
    }
}
