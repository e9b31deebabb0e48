//! Pre-flight validation service
//!
//! Runs before anything is staged:
//! - structure check (hard): every source exists, is a file, is readable
//! - content check (soft): markup files carry a root tag or partial marker
//! - config check (hard): the candidate config passes the service self-test,
//!   run against a disposable copy so the live config is never touched

use std::io::Write;
use std::path::Path;

use crate::domain::entities::DeploymentUnit;
use crate::domain::ports::{FsError, ServiceControl, SourceTree};
use crate::domain::value_objects::ValidationWarning;
use crate::error::DeployError;

/// Opening root element accepted by the markup check
const ROOT_TAG: &str = "<html";

/// Comment that marks a deliberate HTML fragment
const PARTIAL_MARKER: &str = "<!-- partial";

pub struct Validator<'a, S: SourceTree, SC: ServiceControl> {
    tree: &'a S,
    service: &'a SC,
}

impl<'a, S: SourceTree, SC: ServiceControl> Validator<'a, S, SC> {
    pub fn new(tree: &'a S, service: &'a SC) -> Self {
        Self { tree, service }
    }

    /// Run all three checks; returns the soft findings on success
    pub fn validate(
        &self,
        unit: &DeploymentUnit,
        scratch_dir: &Path,
    ) -> Result<Vec<ValidationWarning>, DeployError> {
        self.check_structure(unit)?;
        let warnings = self.check_content(unit);
        self.check_config(unit, scratch_dir)?;
        Ok(warnings)
    }

    /// Every source must be a readable regular file. Reports all problems.
    pub fn check_structure(&self, unit: &DeploymentUnit) -> Result<(), DeployError> {
        let mut problems = Vec::new();

        for entry in unit.entries() {
            if self.tree.is_dir(&entry.source) {
                problems.push((entry.source.clone(), "is a directory".to_string()));
                continue;
            }
            match self.tree.read(&entry.source) {
                Ok(_) => {}
                Err(FsError::NotFound(_)) => {
                    problems.push((entry.source.clone(), "missing".to_string()))
                }
                Err(FsError::PermissionDenied(_)) => {
                    problems.push((entry.source.clone(), "not readable".to_string()))
                }
                Err(e) => problems.push((entry.source.clone(), e.to_string())),
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DeployError::StructureInvalid { problems })
        }
    }

    /// Advisory markup lint. Never fails.
    pub fn check_content(&self, unit: &DeploymentUnit) -> Vec<ValidationWarning> {
        unit.files()
            .iter()
            .filter(|entry| entry.is_markup())
            .filter_map(|entry| {
                let content = self.tree.read(&entry.source).ok()?;
                if looks_like_markup(&content) {
                    None
                } else {
                    Some(ValidationWarning::new(
                        &entry.relative,
                        "no <html> root tag or <!-- partial --> marker",
                    ))
                }
            })
            .collect()
    }

    /// Self-test a disposable copy of the candidate config
    pub fn check_config(
        &self,
        unit: &DeploymentUnit,
        scratch_dir: &Path,
    ) -> Result<(), DeployError> {
        let Some(config) = unit.config() else {
            return Ok(());
        };

        let content =
            self.tree
                .read(&config.entry.source)
                .map_err(|e| DeployError::StructureInvalid {
                    problems: vec![(config.entry.source.clone(), e.to_string())],
                })?;

        let suffix = config
            .entry
            .source
            .file_name()
            .map(|n| format!("-{}", n.to_string_lossy()))
            .unwrap_or_default();
        let mut candidate = tempfile::Builder::new()
            .prefix(".stagehand-check-")
            .suffix(&suffix)
            .tempfile_in(scratch_dir)?;
        candidate.write_all(&content)?;
        candidate.flush()?;

        let outcome = self.service.check_config(candidate.path());
        if outcome.passed {
            Ok(())
        } else {
            Err(DeployError::ConfigSyntaxInvalid {
                service: config.service.clone(),
                path: config.entry.source.clone(),
                diagnostics: outcome.diagnostics,
            })
        }
    }
}

fn looks_like_markup(content: &[u8]) -> bool {
    let text = String::from_utf8_lossy(content).to_ascii_lowercase();
    text.contains(ROOT_TAG) || text.contains(PARTIAL_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ConfigEntry, FileEntry, FileKind};
    use crate::domain::ports::CheckOutcome;
    use crate::infrastructure::fs::LocalSourceTree;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Service that accepts configs containing `server` and remembers paths
    #[derive(Default)]
    struct GrepService {
        checked: RefCell<Vec<PathBuf>>,
    }

    impl ServiceControl for GrepService {
        fn name(&self) -> &str {
            "nginx"
        }

        fn check_config(&self, config: &Path) -> CheckOutcome {
            self.checked.borrow_mut().push(config.to_path_buf());
            let text = fs::read_to_string(config).unwrap_or_default();
            if text.contains("server") {
                CheckOutcome::passed("syntax is ok")
            } else {
                CheckOutcome::failed("unexpected end of file")
            }
        }

        fn reload(&self) -> Result<(), String> {
            Ok(())
        }
    }

    fn unit_with(src: &Path, assets: &[&str], config: Option<&str>) -> DeploymentUnit {
        let files = assets
            .iter()
            .map(|a| FileEntry::asset(src, Path::new("/srv/www"), *a))
            .collect();
        let config = config.map(|c| ConfigEntry {
            entry: FileEntry {
                source: src.join(c),
                dest: PathBuf::from("/etc/nginx/sites-available/admin"),
                relative: PathBuf::from(c),
                kind: FileKind::Config,
            },
            service: "nginx".into(),
            requires_reload: true,
        });
        DeploymentUnit::new(files, config).unwrap()
    }

    #[test]
    fn structure_check_lists_every_problem() {
        let src = tempdir().unwrap();
        fs::create_dir(src.path().join("images")).unwrap();
        let unit = unit_with(src.path(), &["index.html", "images", "login.html"], None);

        let tree = LocalSourceTree::new();
        let service = GrepService::default();
        let err = Validator::new(&tree, &service)
            .check_structure(&unit)
            .unwrap_err();

        match err {
            DeployError::StructureInvalid { problems } => {
                let reasons: Vec<&str> = problems.iter().map(|(_, r)| r.as_str()).collect();
                assert_eq!(reasons, vec!["missing", "is a directory", "missing"]);
            }
            other => panic!("expected StructureInvalid, got {other:?}"),
        }
    }

    #[test]
    fn markup_without_root_or_marker_is_only_a_warning() {
        let src = tempdir().unwrap();
        fs::write(src.path().join("index.html"), "<HTML><body/></HTML>").unwrap();
        fs::write(src.path().join("nav.html"), "<!-- PARTIAL: nav --><ul/>").unwrap();
        fs::write(src.path().join("broken.html"), "<div>oops</div>").unwrap();
        fs::write(src.path().join("logo.png"), "not markup").unwrap();
        let unit = unit_with(
            src.path(),
            &["index.html", "nav.html", "broken.html", "logo.png"],
            None,
        );

        let tree = LocalSourceTree::new();
        let service = GrepService::default();
        let warnings = Validator::new(&tree, &service)
            .validate(&unit, src.path())
            .unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, PathBuf::from("broken.html"));
    }

    #[test]
    fn config_check_runs_against_a_disposable_copy() {
        let src = tempdir().unwrap();
        let scratch = tempdir().unwrap();
        fs::create_dir(src.path().join("nginx")).unwrap();
        fs::write(src.path().join("nginx/admin.conf"), "server { listen 80; }").unwrap();
        let unit = unit_with(src.path(), &[], Some("nginx/admin.conf"));

        let tree = LocalSourceTree::new();
        let service = GrepService::default();
        Validator::new(&tree, &service)
            .check_config(&unit, scratch.path())
            .unwrap();

        let checked = service.checked.borrow();
        assert_eq!(checked.len(), 1);
        assert!(checked[0].starts_with(scratch.path()));
        assert!(!checked[0].exists(), "candidate copy must be removed");
    }

    #[test]
    fn failing_config_check_is_config_syntax_invalid() {
        let src = tempdir().unwrap();
        fs::write(src.path().join("admin.conf"), "upstream {").unwrap();
        let unit = unit_with(src.path(), &[], Some("admin.conf"));

        let tree = LocalSourceTree::new();
        let service = GrepService::default();
        let err = Validator::new(&tree, &service)
            .check_config(&unit, src.path())
            .unwrap_err();

        match err {
            DeployError::ConfigSyntaxInvalid {
                service,
                diagnostics,
                ..
            } => {
                assert_eq!(service, "nginx");
                assert_eq!(diagnostics, "unexpected end of file");
            }
            other => panic!("expected ConfigSyntaxInvalid, got {other:?}"),
        }
    }
}
