//! Common test utilities for the deploy CLI scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated source, target and lock directories plus a
//!   `deploy.toml` wired to harmless service commands
//! - Assertion macros: `assert_deployed!`, `assert_not_deployed!`
//! - Fixtures: reusable portal content

pub mod assertions;
pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
