//! Reload service
//!
//! Runs after a successful commit. Only a unit that carries a config
//! needing a reload ever reaches the external service.

use crate::domain::entities::DeploymentUnit;
use crate::domain::ports::{DeployEvent, DeployEventSink, LiveFileSystem, NoopEventSink, ServiceControl};
use crate::error::DeployError;

use super::committer::{CommitReceipt, Committer};

pub struct Reloader<'a, SC: ServiceControl> {
    service: &'a SC,
    events: &'a dyn DeployEventSink,
}

impl<'a, SC: ServiceControl> Reloader<'a, SC> {
    pub fn new(service: &'a SC) -> Self {
        Self {
            service,
            events: &NoopEventSink,
        }
    }

    pub fn with_events(mut self, events: &'a dyn DeployEventSink) -> Self {
        self.events = events;
        self
    }

    /// Self-test the live config, then reload. Returns whether a reload ran.
    ///
    /// A failed self-test puts the previous config back through the commit
    /// journal; assets stay live. A failed reload leaves everything live.
    pub fn reload<FS: LiveFileSystem>(
        &self,
        unit: &DeploymentUnit,
        receipt: &mut CommitReceipt,
        committer: &Committer<'_, FS>,
    ) -> Result<bool, DeployError> {
        let Some(config) = unit.config().filter(|c| c.requires_reload) else {
            return Ok(false);
        };
        let service = self.service.name().to_string();

        let outcome = self.service.check_config(&config.entry.dest);
        self.events.on_event(DeployEvent::ServiceChecked {
            service: service.clone(),
            passed: outcome.passed,
        });

        if !outcome.passed {
            let restored = committer.rollback_file(&mut receipt.journal, &config.entry.dest);
            return Err(DeployError::ReloadPreCheckFailed {
                service,
                diagnostics: outcome.diagnostics,
                restored,
            });
        }

        self.service
            .reload()
            .map_err(|reason| DeployError::ReloadFailed {
                service: service.clone(),
                reason,
            })?;
        self.events.on_event(DeployEvent::Reloaded { service });
        Ok(true)
    }
}
