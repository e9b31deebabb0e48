//! Cancellable countdown

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// External signal observed during the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSignal {
    /// Abort the pending deployment (interrupt)
    Cancel,
    /// Skip the rest of the wait
    ProceedNow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    Elapsed,
    ProceedNow,
    Cancelled,
}

/// Waits out a delay while listening for `TriggerSignal`s.
///
/// Blocks in `recv_timeout` between ticks; a disconnected channel just
/// sleeps out the remainder of the tick.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    delay: Duration,
    tick: Duration,
}

impl Countdown {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            tick: Duration::from_secs(1),
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run the countdown, calling `on_tick` with the whole seconds left
    pub fn run<F>(&self, signals: &Receiver<TriggerSignal>, mut on_tick: F) -> CountdownOutcome
    where
        F: FnMut(u64),
    {
        let deadline = Instant::now() + self.delay;

        loop {
            let now = Instant::now();
            if now >= deadline {
                return CountdownOutcome::Elapsed;
            }
            let remaining = deadline - now;
            on_tick(whole_secs_ceil(remaining));

            let wait = remaining.min(self.tick);
            match signals.recv_timeout(wait) {
                Ok(TriggerSignal::Cancel) => return CountdownOutcome::Cancelled,
                Ok(TriggerSignal::ProceedNow) => return CountdownOutcome::ProceedNow,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => thread::sleep(wait),
            }
        }
    }
}

fn whole_secs_ceil(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}
