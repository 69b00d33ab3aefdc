//! Timer state enumeration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of the single countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl TimerState {
    /// Check if the countdown is advancing
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running)
    }

    /// States in which the selectors edit the duration without resetting a run
    pub fn accepts_edits(&self) -> bool {
        matches!(self, TimerState::Idle | TimerState::Finished)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Finished => "finished",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
