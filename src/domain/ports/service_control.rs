//! Service control port
//!
//! The external web server is only ever seen through two primitives: a
//! config self-test that must not mutate live state, and a reload.

use std::path::Path;

/// Result of a config self-test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub passed: bool,
    /// Whatever the service printed; shown to the operator on failure
    pub diagnostics: String,
}

impl CheckOutcome {
    pub fn passed(diagnostics: impl Into<String>) -> Self {
        Self {
            passed: true,
            diagnostics: diagnostics.into(),
        }
    }

    pub fn failed(diagnostics: impl Into<String>) -> Self {
        Self {
            passed: false,
            diagnostics: diagnostics.into(),
        }
    }
}

pub trait ServiceControl {
    /// Service name for messages (e.g. `nginx`)
    fn name(&self) -> &str;

    /// Self-test `config` without touching live state
    fn check_config(&self, config: &Path) -> CheckOutcome;

    /// Reload live state from the committed config
    fn reload(&self) -> Result<(), String>;
}
