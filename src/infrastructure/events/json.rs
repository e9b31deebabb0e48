//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// Render one event as a JSON object
pub fn event_to_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            source_root,
            target_root,
            dry_run,
        } => serde_json::json!({
            "event": "start",
            "source": source_root.display().to_string(),
            "target": target_root.display().to_string(),
            "dry_run": dry_run,
            "at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }),

        DeployEvent::Resolved {
            files,
            config,
            scope,
        } => serde_json::json!({
            "event": "resolved",
            "files": files,
            "config": config,
            "scope": scope,
        }),

        DeployEvent::Warning { path, message } => serde_json::json!({
            "event": "warning",
            "path": path.display().to_string(),
            "message": message,
        }),

        DeployEvent::ConfigChecked { service, passed } => serde_json::json!({
            "event": "config_checked",
            "service": service,
            "passed": passed,
        }),

        DeployEvent::Staged { count, staging_dir } => serde_json::json!({
            "event": "staged",
            "count": count,
            "staging_dir": staging_dir.display().to_string(),
        }),

        DeployEvent::Planned {
            index,
            source,
            dest,
            action,
        } => serde_json::json!({
            "event": "planned",
            "index": index,
            "source": source.display().to_string(),
            "dest": dest.display().to_string(),
            "action": action,
        }),

        DeployEvent::FileCommitted { index, path } => serde_json::json!({
            "event": "item_written",
            "index": index,
            "path": path.display().to_string(),
        }),

        DeployEvent::RolledBack {
            restored,
            unrestored,
        } => serde_json::json!({
            "event": "rolled_back",
            "restored": restored,
            "unrestored": unrestored,
        }),

        DeployEvent::ServiceChecked { service, passed } => serde_json::json!({
            "event": "service_checked",
            "service": service,
            "passed": passed,
        }),

        DeployEvent::Reloaded { service } => serde_json::json!({
            "event": "reloaded",
            "service": service,
        }),

        DeployEvent::Scheduled { scope, delay_secs } => serde_json::json!({
            "event": "scheduled",
            "scope": scope,
            "delay_secs": delay_secs,
        }),

        DeployEvent::Countdown { remaining_secs } => serde_json::json!({
            "event": "countdown",
            "remaining_secs": remaining_secs,
        }),

        DeployEvent::Failed {
            kind,
            message,
            exit_code,
        } => serde_json::json!({
            "event": "error",
            "kind": kind,
            "message": message,
            "exit_code": exit_code,
        }),

        DeployEvent::Completed {
            status,
            files_written,
            reload_performed,
        } => serde_json::json!({
            "event": "complete",
            "status": status,
            "written": files_written,
            "reloaded": reload_performed,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_to_json(&event));
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
