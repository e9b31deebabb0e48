//! Service control implementations

mod command;

pub use command::{CommandService, CONFIG_PLACEHOLDER, MAIN_CONFIG_PLACEHOLDER};
