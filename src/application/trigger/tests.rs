//! Trigger Use Case Tests

use super::*;
use crate::application::deploy::{DeployOptions, DeployUseCase};
use crate::domain::entities::{AssetSpec, ConfigSpec, Manifest};
use crate::domain::ports::deploy_events::testing::RecordingEventSink;
use crate::domain::ports::{CheckOutcome, DeployEvent, ServiceControl};
use crate::domain::value_objects::{ChangeSet, DeployScope, DeploymentStatus};
use crate::infrastructure::{LocalFs, LocalSourceTree};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

#[derive(Default)]
struct CountingService {
    reloads: Cell<usize>,
}

impl ServiceControl for CountingService {
    fn name(&self) -> &str {
        "nginx"
    }

    fn check_config(&self, _config: &Path) -> CheckOutcome {
        CheckOutcome::passed("ok")
    }

    fn reload(&self) -> Result<(), String> {
        self.reloads.set(self.reloads.get() + 1);
        Ok(())
    }
}

struct Repo {
    source: TempDir,
    target: TempDir,
    scratch: TempDir,
}

impl Repo {
    fn new() -> Self {
        let repo = Self {
            source: tempdir().unwrap(),
            target: tempdir().unwrap(),
            scratch: tempdir().unwrap(),
        };
        fs::write(repo.source.path().join("index.html"), "<html></html>").unwrap();
        fs::create_dir_all(repo.source.path().join("nginx")).unwrap();
        fs::write(repo.source.path().join("nginx/site.conf"), "server {}").unwrap();
        fs::write(repo.source.path().join("README.md"), "docs").unwrap();
        repo
    }

    fn options(&self, changed: &[&str]) -> TriggerOptions {
        let manifest = Manifest {
            assets: vec![AssetSpec::required("index.html")],
            config: Some(ConfigSpec {
                source: PathBuf::from("nginx/site.conf"),
                dest: self.target.path().join("site.conf"),
                service: "nginx".into(),
                requires_reload: true,
            }),
        };
        let deploy = DeployOptions::new(self.source.path(), self.target.path(), manifest)
            .with_changes(ChangeSet::from_paths(changed.iter().copied(), self.source.path()))
            .with_lock_dir(self.scratch.path())
            .with_staging_dir(self.scratch.path());
        let countdown = Countdown::new(Duration::from_secs(30)).with_tick(Duration::from_millis(10));
        TriggerOptions::new(deploy, countdown)
    }

    fn deployed(&self) -> bool {
        self.target.path().join("index.html").exists()
    }
}

fn trigger() -> TriggerUseCase<LocalSourceTree, LocalFs, CountingService> {
    TriggerUseCase::new(DeployUseCase::new(
        LocalSourceTree::new(),
        LocalFs::new(),
        CountingService::default(),
    ))
}

fn signalled(signal: TriggerSignal) -> (Sender<TriggerSignal>, std::sync::mpsc::Receiver<TriggerSignal>) {
    let (tx, rx) = channel();
    tx.send(signal).unwrap();
    (tx, rx)
}

#[test]
fn opt_out_skips_before_anything_runs() {
    let repo = Repo::new();
    let sink = RecordingEventSink::default();
    let (_tx, rx) = signalled(TriggerSignal::ProceedNow);

    let options = repo.options(&["index.html"]).with_opt_out(Some("1".into()));
    let result = trigger().execute_with_events(&options, &rx, Arc::new(sink.clone()));

    assert_eq!(result.status, DeploymentStatus::Skipped);
    assert_eq!(result.reason.as_deref(), Some("SKIP_DEPLOY is set"));
    assert!(!repo.deployed());
    assert!(!sink
        .recorded()
        .iter()
        .any(|e| matches!(e, DeployEvent::Countdown { .. })));
}

#[test]
fn empty_opt_out_value_does_not_skip() {
    let repo = Repo::new();
    let (_tx, rx) = signalled(TriggerSignal::ProceedNow);

    let options = repo.options(&["index.html"]).with_opt_out(Some(String::new()));
    let result = trigger().execute(&options, &rx);

    assert_eq!(result.status, DeploymentStatus::Success);
    assert!(repo.deployed());
}

#[test]
fn unrelated_commit_reports_nothing_without_a_countdown() {
    let repo = Repo::new();
    let sink = RecordingEventSink::default();
    let (_tx, rx) = channel();

    let result = trigger().execute_with_events(&repo.options(&["README.md"]), &rx, Arc::new(sink.clone()));

    assert_eq!(result.status, DeploymentStatus::NothingToDeploy);
    assert!(!sink.recorded().iter().any(|e| matches!(
        e,
        DeployEvent::Scheduled { .. } | DeployEvent::Countdown { .. }
    )));
}

#[test]
fn cancel_during_countdown_deploys_nothing() {
    let repo = Repo::new();
    let (_tx, rx) = signalled(TriggerSignal::Cancel);
    let uc = trigger();

    let result = uc.execute(&repo.options(&["index.html", "nginx/site.conf"]), &rx);

    assert_eq!(result.status, DeploymentStatus::Cancelled);
    assert_eq!(result.scope, Some(DeployScope::Full));
    assert_eq!(result.exit_code(), 0);
    assert!(!repo.deployed());
    assert_eq!(uc.deploy().service().reloads.get(), 0);
}

#[test]
fn proceed_now_deploys_forced_with_the_commit_scope() {
    let repo = Repo::new();
    let sink = RecordingEventSink::default();
    let (_tx, rx) = signalled(TriggerSignal::ProceedNow);
    let uc = trigger();

    let result = uc.execute_with_events(&repo.options(&["index.html"]), &rx, Arc::new(sink.clone()));

    assert!(result.is_success(), "{:?}", result.error);
    assert_eq!(result.scope, Some(DeployScope::WebOnly));
    assert!(repo.deployed());
    assert_eq!(uc.deploy().service().reloads.get(), 0);
    assert!(sink.recorded().iter().any(|e| matches!(
        e,
        DeployEvent::Scheduled {
            scope: Some(DeployScope::WebOnly),
            delay_secs: 30
        }
    )));
}

#[test]
fn missing_source_fails_before_the_countdown() {
    let repo = Repo::new();
    fs::remove_file(repo.source.path().join("index.html")).unwrap();
    let (_tx, rx) = channel();

    let result = trigger().execute(&repo.options(&["index.html"]), &rx);

    assert_eq!(result.status, DeploymentStatus::Failed);
    assert_eq!(result.exit_code(), 2);
}
