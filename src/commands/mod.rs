//! Command handlers for the `deploy` binary

pub mod deploy;
pub mod install_hook;
pub mod post_commit;

mod report;
mod workspace;
