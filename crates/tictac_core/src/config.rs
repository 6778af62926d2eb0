//! Tunable round settings.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What happens after the countdown runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Stay in `TimedOut` until an explicit reset.
    #[default]
    Halt,
    /// Start a fresh round right after the timeout callback.
    AutoReset,
}

/// Round settings shared by the controller and its adapters.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct RoundConfig {
    /// Countdown length in seconds.
    round_secs: u64,

    /// How often adapters should report elapsed time, in milliseconds.
    tick_millis: u64,

    /// Drop random marks onto the board after a tie.
    chaos: bool,

    /// Rounds numbered above this get a second chaos mark.
    second_mark_after_round: u32,

    /// Recovery after the countdown expires.
    timeout_policy: TimeoutPolicy,

    /// Seed for chaos placements; OS entropy when absent.
    seed: Option<u64>,
}

impl RoundConfig {
    /// Countdown length.
    pub fn round_duration(&self) -> Duration {
        Duration::from_secs(self.round_secs)
    }

    /// Tick period for adapters.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_secs: 30,
            tick_millis: 250,
            chaos: true,
            second_mark_after_round: 2,
            timeout_policy: TimeoutPolicy::Halt,
            seed: None,
        }
    }
}
