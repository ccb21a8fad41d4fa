//! Elapsed-time measurement for the phases of loading a schema.

use std::time::{Duration, Instant};

use tracing::trace;

/// Whole microseconds in `elapsed`, saturating at `u64::MAX`.
pub(crate) fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Adds the time between its creation and its drop to `slot`, and emits a
/// trace event naming the phase. Early returns are timed too.
///
/// ```rust,ignore
/// let mut parse = Duration::ZERO;
/// {
///     let _timer = PhaseTimer::new("parse", &mut parse);
///     // ... parse ...
/// }
/// ```
pub struct PhaseTimer<'a> {
    phase: &'static str,
    start: Instant,
    slot: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(phase: &'static str, slot: &'a mut Duration) -> Self {
        Self {
            phase,
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        *self.slot += elapsed;
        trace!(
            event = "Timer",
            phase = self.phase,
            elapsed_us = micros(elapsed)
        );
    }
}
