//! Trigger Use Case
//!
//! 1. Honour the `SKIP_DEPLOY` opt-out
//! 2. Resolve the change-set; an empty unit ends here, with no countdown
//! 3. Report the scope and count down
//! 4. Hand off to `DeployUseCase`, forced (the countdown was the confirmation)

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use crate::application::deploy::{DeployOptions, DeployUseCase, DeploymentResult};
use crate::domain::ports::{
    AutoConfirm, DeployEvent, DeployEventSink, LiveFileSystem, NoopEventSink, ServiceControl,
    SourceTree,
};
use crate::domain::services::Resolution;
use crate::domain::value_objects::DeploymentStatus;
use crate::error::DeployError;

use super::countdown::{Countdown, CountdownOutcome, TriggerSignal};

/// Environment variable that skips the hook when set to anything non-empty
pub const OPT_OUT_VAR: &str = "SKIP_DEPLOY";

#[derive(Debug, Clone)]
pub struct TriggerOptions {
    pub deploy: DeployOptions,
    pub countdown: Countdown,
    /// Value of the opt-out variable, if any
    pub opt_out: Option<String>,
}

impl TriggerOptions {
    pub fn new(deploy: DeployOptions, countdown: Countdown) -> Self {
        Self {
            deploy,
            countdown,
            opt_out: None,
        }
    }

    pub fn with_opt_out(mut self, value: Option<String>) -> Self {
        self.opt_out = value;
        self
    }

    /// Read the opt-out from the process environment
    pub fn with_env_opt_out(self) -> Self {
        let value = std::env::var(OPT_OUT_VAR).ok();
        self.with_opt_out(value)
    }

    fn opted_out(&self) -> bool {
        self.opt_out.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Post-commit trigger - a thin, delayed caller of the deploy pipeline
pub struct TriggerUseCase<S, FS, SC>
where
    S: SourceTree,
    FS: LiveFileSystem,
    SC: ServiceControl,
{
    deploy: DeployUseCase<S, FS, SC>,
}

impl<S, FS, SC> TriggerUseCase<S, FS, SC>
where
    S: SourceTree,
    FS: LiveFileSystem,
    SC: ServiceControl,
{
    pub fn new(deploy: DeployUseCase<S, FS, SC>) -> Self {
        Self { deploy }
    }

    pub fn deploy(&self) -> &DeployUseCase<S, FS, SC> {
        &self.deploy
    }

    /// Run the trigger silently
    pub fn execute(
        &self,
        options: &TriggerOptions,
        signals: &Receiver<TriggerSignal>,
    ) -> DeploymentResult {
        self.execute_with_events(options, signals, Arc::new(NoopEventSink))
    }

    /// Run the trigger, reporting the countdown and the deployment
    pub fn execute_with_events(
        &self,
        options: &TriggerOptions,
        signals: &Receiver<TriggerSignal>,
        events: Arc<dyn DeployEventSink>,
    ) -> DeploymentResult {
        if options.opted_out() {
            let result = DeploymentResult::new(DeploymentStatus::Skipped)
                .with_reason(format!("{OPT_OUT_VAR} is set"));
            return finish(result, events.as_ref());
        }

        let unit = match self.deploy.resolve(&options.deploy) {
            Ok(Resolution::Unit(unit)) => unit,
            Ok(Resolution::NothingToDeploy) => {
                let result = DeploymentResult::new(DeploymentStatus::NothingToDeploy)
                    .with_reason("commit touched no deployed path");
                return finish(result, events.as_ref());
            }
            Err(err) => return finish(failed(err, events.as_ref()), events.as_ref()),
        };

        let scope = unit.scope();
        events.on_event(DeployEvent::Scheduled {
            scope,
            delay_secs: options.countdown.delay().as_secs(),
        });

        let outcome = options.countdown.run(signals, |remaining_secs| {
            events.on_event(DeployEvent::Countdown { remaining_secs });
        });
        if outcome == CountdownOutcome::Cancelled {
            let mut result = DeploymentResult::new(DeploymentStatus::Cancelled)
                .with_reason("cancelled during the countdown");
            result.scope = scope;
            return finish(result, events.as_ref());
        }

        let forced = options.deploy.clone().with_force(true);
        self.deploy
            .execute_full(&forced, events, Arc::new(AutoConfirm))
    }
}

fn failed(err: DeployError, events: &dyn DeployEventSink) -> DeploymentResult {
    events.on_event(DeployEvent::Failed {
        kind: err.kind(),
        message: err.to_string(),
        exit_code: err.exit_code(),
    });
    let mut result = DeploymentResult::new(DeploymentStatus::Failed);
    result.error = Some(err);
    result
}

fn finish(mut result: DeploymentResult, events: &dyn DeployEventSink) -> DeploymentResult {
    result.finished_at = chrono::Utc::now();
    events.on_event(DeployEvent::Completed {
        status: result.status,
        files_written: 0,
        reload_performed: false,
    });
    result
}
