//! Trigger Module
//!
//! Delayed, cancellable invocation of the deploy pipeline, driven by the
//! post-commit hook.
//!
//! ## Structure
//!
//! - `countdown` - The cancellable wait (`Countdown`, `TriggerSignal`)
//! - `use_case` - Opt-out, scope resolution and hand-off (`TriggerUseCase`)

mod countdown;
mod use_case;

pub use countdown::{Countdown, CountdownOutcome, TriggerSignal};
pub use use_case::{TriggerOptions, TriggerUseCase, OPT_OUT_VAR};

#[cfg(test)]
mod tests;
