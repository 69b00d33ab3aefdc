//! The timer session and the duration selectors that feed it

use std::{fmt, str::FromStr, time::Duration};

use super::TimerState;
use crate::error::TimerError;

/// Highest value either selector can hold
pub const MAX_SELECTOR: u8 = 59;

/// Minutes and seconds picked on the two selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSelection {
    minutes: u8,
    seconds: u8,
}

impl DurationSelection {
    /// Build a selection, rejecting values outside `0..=59`
    pub fn new(minutes: u8, seconds: u8) -> Result<Self, TimerError> {
        if minutes > MAX_SELECTOR || seconds > MAX_SELECTOR {
            return Err(TimerError::InvalidSelection(format!(
                "{minutes}:{seconds} is outside 0..={MAX_SELECTOR}"
            )));
        }
        Ok(Self { minutes, seconds })
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// `minutes * 60 + seconds`
    pub fn total(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }
}

impl Default for DurationSelection {
    /// 20:00
    fn default() -> Self {
        Self {
            minutes: 20,
            seconds: 0,
        }
    }
}

impl fmt::Display for DurationSelection {
    /// Stored form, `MM:SS`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

impl FromStr for DurationSelection {
    type Err = TimerError;

    /// Parse `M:S` or `MM:SS`; unpadded fields are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimerError::InvalidSelection(format!("malformed duration '{s}'"));

        let (mm, ss) = s.trim().split_once(':').ok_or_else(invalid)?;
        let minutes = mm.trim().parse::<u8>().map_err(|_| invalid())?;
        let seconds = ss.trim().parse::<u8>().map_err(|_| invalid())?;
        Self::new(minutes, seconds)
    }
}

/// Point-in-time copy of the session handed to render sinks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub state: TimerState,
    pub total: Duration,
    pub remaining: Duration,
    pub dark_mode: bool,
}

impl Snapshot {
    pub fn total_seconds(&self) -> f64 {
        self.total.as_secs_f64()
    }

    pub fn remaining_seconds(&self) -> f64 {
        self.remaining.as_secs_f64()
    }
}

/// Aggregate root for the one timer that exists per process.
///
/// Only [`TimerMachine`](super::TimerMachine) mutates a session; everything
/// else reads it through [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSession {
    pub(crate) state: TimerState,
    pub(crate) total: Duration,
    pub(crate) remaining: Duration,
    pub(crate) dark_mode: bool,
    pub(crate) selection: DurationSelection,
}

impl TimerSession {
    /// Create an idle session for the given selection
    pub fn new(selection: DurationSelection, dark_mode: bool) -> Self {
        let total = selection.total();
        Self {
            state: TimerState::Idle,
            total,
            remaining: total,
            dark_mode,
            selection,
        }
    }

    /// Create an idle session with an arbitrary total, including sub-second ones
    pub fn with_total(total: Duration, dark_mode: bool) -> Self {
        Self {
            total,
            remaining: total,
            ..Self::new(DurationSelection::default(), dark_mode)
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn total_seconds(&self) -> f64 {
        self.total.as_secs_f64()
    }

    pub fn remaining_seconds(&self) -> f64 {
        self.remaining.as_secs_f64()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn selection(&self) -> DurationSelection {
        self.selection
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            total: self.total,
            remaining: self.remaining,
            dark_mode: self.dark_mode,
        }
    }

    /// Check the time-accounting invariants for the current state
    pub fn is_consistent(&self) -> bool {
        if self.remaining > self.total {
            return false;
        }
        match self.state {
            TimerState::Idle => self.remaining == self.total,
            TimerState::Finished => self.remaining.is_zero(),
            TimerState::Running | TimerState::Paused => true,
        }
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new(DurationSelection::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_rejects_out_of_range() {
        assert!(DurationSelection::new(59, 59).is_ok());
        assert!(DurationSelection::new(60, 0).is_err());
        assert!(DurationSelection::new(0, 60).is_err());
    }

    #[test]
    fn selection_total() {
        let selection = DurationSelection::new(2, 5).unwrap();
        assert_eq!(selection.total(), Duration::from_secs(125));
        assert_eq!(DurationSelection::default().total(), Duration::from_secs(1200));
    }

    #[test]
    fn selection_round_trips_through_storage_form() {
        let selection = DurationSelection::new(7, 3).unwrap();
        assert_eq!(selection.to_string(), "07:03");
        assert_eq!("07:03".parse::<DurationSelection>().unwrap(), selection);
        assert_eq!("7:3".parse::<DurationSelection>().unwrap(), selection);
    }

    #[test]
    fn malformed_storage_is_rejected() {
        for raw in ["", "20", "aa:bb", "20:00:00", "61:00", "-1:00", "5:"] {
            assert!(raw.parse::<DurationSelection>().is_err(), "{raw} parsed");
        }
    }

    #[test]
    fn new_session_is_idle_and_full() {
        let session = TimerSession::default();
        assert_eq!(session.state(), TimerState::Idle);
        assert_eq!(session.remaining(), session.total());
        assert_eq!(session.total_seconds(), 1200.0);
        assert!(!session.dark_mode());
        assert!(session.is_consistent());
    }

    #[test]
    fn sub_second_session() {
        let session = TimerSession::with_total(Duration::from_millis(300), true);
        assert_eq!(session.remaining_seconds(), 0.3);
        assert!(session.dark_mode());
    }
}
