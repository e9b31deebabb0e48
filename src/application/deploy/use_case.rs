//! Deploy Use Case
//!
//! Orchestrates one deployment run:
//! 1. Take the per-target lock
//! 2. Resolve the manifest into a unit
//! 3. Validate (structure, content, candidate config)
//! 4. Stage and plan
//! 5. Confirm, commit, reload
//!
//! This use case is pure orchestration - all business logic lives in domain services.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::DeploymentUnit;
use crate::domain::ports::{
    AutoConfirm, ConfirmDecision, DeployEvent, DeployEventSink, LiveFileSystem, NoopEventSink,
    PlanConfirmer, ServiceControl, SourceTree, Unattended,
};
use crate::domain::services::{
    Committer, DeploymentPlan, ManifestResolver, Planner, Reloader, Resolution, Stager, Validator,
};
use crate::domain::value_objects::DeploymentStatus;
use crate::error::DeployError;
use crate::infrastructure::DeployLock;

use super::options::DeployOptions;
use super::result::DeploymentResult;

/// Deploy use case - orchestrates the deployment flow
///
/// Parameterized by its ports so tests can swap in failing file systems
/// and recording services.
pub struct DeployUseCase<S, FS, SC>
where
    S: SourceTree,
    FS: LiveFileSystem,
    SC: ServiceControl,
{
    tree: S,
    fs: FS,
    service: SC,
}

impl<S, FS, SC> DeployUseCase<S, FS, SC>
where
    S: SourceTree,
    FS: LiveFileSystem,
    SC: ServiceControl,
{
    pub fn new(tree: S, fs: FS, service: SC) -> Self {
        Self { tree, fs, service }
    }

    /// The service this use case validates and reloads
    pub fn service(&self) -> &SC {
        &self.service
    }

    /// Execute the deploy use case.
    ///
    /// Without `force` there is nobody to confirm, so a non-dry run fails
    /// with `ConfirmationRequired`.
    pub fn execute(&self, options: &DeployOptions) -> DeploymentResult {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> DeploymentResult {
        let confirmer: Arc<dyn PlanConfirmer> = if options.force {
            Arc::new(AutoConfirm)
        } else {
            Arc::new(Unattended)
        };
        self.execute_full(options, event_sink, confirmer)
    }

    /// Execute with a custom confirmation prompt
    pub fn execute_full(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
        confirmer: Arc<dyn PlanConfirmer>,
    ) -> DeploymentResult {
        let mut result = DeploymentResult::new(DeploymentStatus::Success);

        let outcome = self.run(options, event_sink.as_ref(), confirmer.as_ref(), &mut result);
        if let Err(err) = outcome {
            if let DeployError::CommitFailed { files_written, .. } = &err {
                result.files_written = *files_written;
            }
            event_sink.on_event(DeployEvent::Failed {
                kind: err.kind(),
                message: err.to_string(),
                exit_code: err.exit_code(),
            });
            result.status = DeploymentStatus::Failed;
            result.error = Some(err);
        }

        result.finished_at = Utc::now();
        event_sink.on_event(DeployEvent::Completed {
            status: result.status,
            files_written: result.files_written,
            reload_performed: result.reload_performed,
        });
        result
    }

    /// Resolve the unit without locking or touching anything
    pub fn resolve(&self, options: &DeployOptions) -> Result<Resolution, DeployError> {
        ManifestResolver::new(&self.tree).resolve(
            &options.source_root,
            &options.target_root,
            &options.effective_manifest(),
            options.changes.as_ref(),
        )
    }

    fn run(
        &self,
        options: &DeployOptions,
        events: &dyn DeployEventSink,
        confirmer: &dyn PlanConfirmer,
        result: &mut DeploymentResult,
    ) -> Result<(), DeployError> {
        let _lock = DeployLock::acquire(&options.lock_dir, &options.target_root)?;

        events.on_event(DeployEvent::Started {
            source_root: options.source_root.clone(),
            target_root: options.target_root.clone(),
            dry_run: options.dry_run,
        });

        let unit = match self.resolve(options)? {
            Resolution::Unit(unit) => unit,
            Resolution::NothingToDeploy => {
                result.status = DeploymentStatus::NothingToDeploy;
                result.reason = Some("no manifest path changed".to_string());
                return Ok(());
            }
        };
        result.scope = unit.scope();
        events.on_event(DeployEvent::Resolved {
            files: unit.files().len(),
            config: unit.config().is_some(),
            scope: result.scope,
        });

        self.validate(&unit, options, events, result)?;

        let staging = Stager::new(&self.tree, &self.fs).stage(&unit, &options.staging_dir)?;
        events.on_event(DeployEvent::Staged {
            count: staging.files().len(),
            staging_dir: staging.path().to_path_buf(),
        });

        let plan = Planner::new(&self.fs).plan(&staging);
        emit_plan(&plan, events);

        if options.dry_run {
            result.status = DeploymentStatus::DryRunOnly;
            result.plan = Some(plan);
            return Ok(());
        }

        if !options.force {
            match confirmer.confirm(&plan) {
                ConfirmDecision::Proceed => {}
                ConfirmDecision::Decline => {
                    result.status = DeploymentStatus::Cancelled;
                    result.reason = Some("declined at the confirmation prompt".to_string());
                    result.plan = Some(plan);
                    return Ok(());
                }
                ConfirmDecision::Unavailable => return Err(DeployError::ConfirmationRequired),
            }
        }
        result.plan = Some(plan);

        let committer = Committer::new(&self.fs, options.policy)
            .with_config_policy(options.config_policy)
            .with_events(events);
        let mut receipt = committer.commit(&staging, &options.staging_dir)?;
        result.files_written = receipt.files_written;
        let staging_dir = staging.path().to_path_buf();
        if let Err(e) = staging.discard() {
            events.on_event(DeployEvent::Warning {
                path: staging_dir,
                message: format!("staging area not removed: {e}"),
            });
        }

        result.reload_performed = Reloader::new(&self.service)
            .with_events(events)
            .reload(&unit, &mut receipt, &committer)?;

        Ok(())
    }

    fn validate(
        &self,
        unit: &DeploymentUnit,
        options: &DeployOptions,
        events: &dyn DeployEventSink,
        result: &mut DeploymentResult,
    ) -> Result<(), DeployError> {
        let validator = Validator::new(&self.tree, &self.service);
        validator.check_structure(unit)?;

        let warnings = validator.check_content(unit);
        for warning in &warnings {
            events.on_event(DeployEvent::Warning {
                path: warning.path.clone(),
                message: warning.message.clone(),
            });
        }
        result.warnings = warnings;

        if let Some(config) = unit.config() {
            let checked = validator.check_config(unit, &options.staging_dir);
            events.on_event(DeployEvent::ConfigChecked {
                service: config.service.clone(),
                passed: checked.is_ok(),
            });
            checked?;
        }
        Ok(())
    }
}

fn emit_plan(plan: &DeploymentPlan, events: &dyn DeployEventSink) {
    for (index, file) in plan.files.iter().enumerate() {
        events.on_event(DeployEvent::Planned {
            index,
            source: file.source.clone(),
            dest: file.dest.clone(),
            action: file.action,
        });
    }
}
