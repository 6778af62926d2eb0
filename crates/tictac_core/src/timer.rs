//! Countdown for a single round.
//!
//! The timer owns no clock. The event loop reports elapsed time through
//! [`RoundTimer::advance`], which keeps the controller synchronous and lets
//! tests drive time explicitly.

use std::time::Duration;
use tracing::{debug, instrument};

/// Result of advancing the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Still counting down.
    Running(Duration),
    /// Reached zero during this advance. Reported once per countdown.
    Expired,
    /// Not armed; nothing happened.
    Stopped,
}

/// Countdown timer for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTimer {
    duration: Duration,
    elapsed: Duration,
    running: bool,
    generation: u64,
}

impl RoundTimer {
    /// Creates a stopped timer that counts down from `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            running: false,
            generation: 0,
        }
    }

    /// Arms the countdown from its full duration.
    ///
    /// Clears elapsed time, so a restart never inherits the expiry of the
    /// previous countdown. The generation counter only tags log lines.
    #[instrument(skip(self), fields(generation = self.generation + 1))]
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = true;
        self.generation += 1;
        debug!(duration = ?self.duration, "Round timer started");
    }

    /// Stops the countdown. Calling it on a stopped timer does nothing.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            debug!(elapsed = ?self.elapsed, "Round timer stopped");
        }
    }

    /// Advances the countdown by `delta`.
    pub fn advance(&mut self, delta: Duration) -> TimerEvent {
        if !self.running {
            return TimerEvent::Stopped;
        }

        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        if self.elapsed >= self.duration {
            self.running = false;
            debug!(generation = self.generation, "Round timer expired");
            TimerEvent::Expired
        } else {
            TimerEvent::Running(self.remaining())
        }
    }

    /// Time left on the countdown.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Time counted so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Full countdown length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the countdown is armed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of times the timer has been started.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
