//! Domain Entities
//!
//! - `Manifest` - the fixed list of asset paths and the config path
//! - `DeploymentUnit` - the files one run deploys
//! - `RollbackJournal` - undo log kept while committing

mod journal;
mod manifest;
mod unit;

pub use journal::{FileSnapshot, JournalAction, JournalEntry, RollbackJournal};
pub use manifest::{AssetSpec, ConfigSpec, Manifest};
pub use unit::{ConfigEntry, DeploymentUnit, FileEntry, FileKind};
