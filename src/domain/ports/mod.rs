//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod confirmation;
pub mod deploy_events;
pub mod file_system;
pub mod service_control;

pub use confirmation::{AutoConfirm, ConfirmDecision, PlanConfirmer, Unattended};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use file_system::{FsError, FsResult, LiveFileSystem, SourceTree};
pub use service_control::{CheckOutcome, ServiceControl};
