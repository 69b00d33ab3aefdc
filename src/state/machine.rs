//! Timer state machine
//!
//! ```text
//! Idle --tap--> Running --tap--> Paused --tap--> Running
//!                  |                                |
//!                  +------tick reaches zero---------+--> Finished --tap--> Idle
//! Running/Paused --duration edit--> Idle
//! ```
//!
//! The machine is the only writer of the [`TimerSession`]. Every operation
//! finishes mutating the session before any collaborator sees it, and the
//! tick schedule is created and cancelled only by `enter_running` and
//! `leave_running`.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use super::{DurationSelection, Snapshot, TimerSession, TimerState};
use crate::{
    render::RenderSink,
    services::{
        prefs::{self, PreferenceStore, Preferences},
        AwakeLock, NotificationKind, Notifier,
    },
    tasks::ticker::{TickId, TickScheduler, TICK_QUANTUM},
};

/// User input the machine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerInput {
    Tap,
    SetDuration(DurationSelection),
    SetDarkMode(bool),
    Reload,
}

/// What an operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEvent {
    /// Idle to Running
    Started,
    /// Paused to Running
    Resumed,
    /// Running to Paused
    Paused,
    /// Running to Finished after the last tick
    Finished,
    /// Finished to Idle
    Reset,
    /// New duration; `interrupted` when a run was discarded
    DurationChanged { interrupted: bool },
    ThemeChanged,
    /// Running, time decreased
    Ticked,
    /// Session rebuilt from stored preferences
    Reloaded,
}

/// Collaborators the machine drives as side effects
pub struct Collaborators {
    pub ticker: Box<dyn TickScheduler>,
    pub awake: AwakeLock,
    pub notifier: Notifier,
    pub sink: Box<dyn RenderSink>,
    pub store: Box<dyn PreferenceStore>,
}

/// Owner of the single timer session
pub struct TimerMachine {
    session: TimerSession,
    active_tick: Option<TickId>,
    next_tick: u64,
    ticker: Box<dyn TickScheduler>,
    awake: AwakeLock,
    notifier: Notifier,
    sink: Box<dyn RenderSink>,
    store: Box<dyn PreferenceStore>,
}

impl TimerMachine {
    /// Wrap an existing session and render it once
    pub fn new(session: TimerSession, parts: Collaborators) -> Self {
        let mut machine = Self {
            session,
            active_tick: None,
            next_tick: 0,
            ticker: parts.ticker,
            awake: parts.awake,
            notifier: parts.notifier,
            sink: parts.sink,
            store: parts.store,
        };
        machine.render();
        machine
    }

    /// Build the session from stored preferences, or 20:00 light by default
    pub fn restore(parts: Collaborators) -> Self {
        let prefs = Preferences::load(parts.store.as_ref());
        info!(
            "Restored duration {} and {} theme",
            prefs.selection,
            if prefs.dark_mode { "dark" } else { "light" }
        );
        Self::new(TimerSession::new(prefs.selection, prefs.dark_mode), parts)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn state(&self) -> TimerState {
        self.session.state
    }

    pub fn active_tick(&self) -> Option<TickId> {
        self.active_tick
    }

    pub fn awake_lock(&self) -> &AwakeLock {
        &self.awake
    }

    // ── Operations ───────────────────────────────────────────────────

    pub fn apply(&mut self, input: TimerInput) -> TransitionEvent {
        match input {
            TimerInput::Tap => self.tap(),
            TimerInput::SetDuration(selection) => self.set_duration(selection),
            TimerInput::SetDarkMode(dark_mode) => self.set_dark_mode(dark_mode),
            TimerInput::Reload => self.reload(),
        }
    }

    /// Tap on the circular control
    pub fn tap(&mut self) -> TransitionEvent {
        let event = match self.session.state {
            TimerState::Idle => {
                self.session.remaining = self.session.total;
                self.session.state = TimerState::Running;
                self.enter_running();
                TransitionEvent::Started
            }
            TimerState::Running => {
                self.session.state = TimerState::Paused;
                self.leave_running();
                TransitionEvent::Paused
            }
            TimerState::Paused => {
                self.session.state = TimerState::Running;
                self.enter_running();
                TransitionEvent::Resumed
            }
            TimerState::Finished => {
                // total already tracks the selectors: edits while finished update it
                self.session.remaining = self.session.total;
                self.session.state = TimerState::Idle;
                TransitionEvent::Reset
            }
        };

        info!("Tap: {:?} -> {}", event, self.session.state);
        self.render();
        event
    }

    /// Selector change. Persists the selection, then applies the new total.
    pub fn set_duration(&mut self, selection: DurationSelection) -> TransitionEvent {
        prefs::store_selection(self.store.as_mut(), selection);
        self.session.selection = selection;
        self.set_total(selection.total())
    }

    /// Apply a new total. A run in progress is discarded.
    pub fn set_total(&mut self, total: Duration) -> TransitionEvent {
        let interrupted = !self.session.state.accepts_edits();
        if interrupted {
            self.leave_running();
            self.session.state = TimerState::Idle;
        }

        self.session.total = total;
        // A finished run keeps showing zero until it is tapped back to idle
        if self.session.state != TimerState::Finished {
            self.session.remaining = total;
        }

        info!(
            "Duration set to {:?} ({})",
            total,
            if interrupted { "run discarded" } else { "state kept" }
        );
        self.render();
        TransitionEvent::DurationChanged { interrupted }
    }

    /// Theme toggle. Leaves state, time and the tick untouched.
    pub fn set_dark_mode(&mut self, dark_mode: bool) -> TransitionEvent {
        prefs::store_dark_mode(self.store.as_mut(), dark_mode);
        self.session.dark_mode = dark_mode;
        info!("Dark mode {}", if dark_mode { "on" } else { "off" });
        self.render();
        TransitionEvent::ThemeChanged
    }

    /// Advance the countdown by one quantum.
    ///
    /// Returns `None` for a tick that does not belong to the active schedule,
    /// which is how ticks already in flight at cancellation are dropped.
    pub fn on_tick(&mut self, id: TickId) -> Option<TransitionEvent> {
        if self.active_tick != Some(id) || !self.session.state.is_running() {
            debug!("Ignoring stale tick {}", id);
            return None;
        }

        let event = match self.session.remaining.checked_sub(TICK_QUANTUM) {
            Some(left) if !left.is_zero() => {
                self.session.remaining = left;
                TransitionEvent::Ticked
            }
            _ => {
                self.session.remaining = Duration::ZERO;
                self.session.state = TimerState::Finished;
                self.leave_running();
                self.notifier.notify(NotificationKind::Finish);
                info!("Countdown finished");
                TransitionEvent::Finished
            }
        };

        self.render();
        Some(event)
    }

    /// Full reset: drop any run and rebuild the session from preferences
    pub fn reload(&mut self) -> TransitionEvent {
        if !self.session.state.accepts_edits() {
            self.leave_running();
        }
        let prefs = Preferences::load(self.store.as_ref());
        self.session = TimerSession::new(prefs.selection, prefs.dark_mode);
        info!("Session reloaded");
        self.render();
        TransitionEvent::Reloaded
    }

    /// Stop ticking and let go of the awake lock before exit
    pub fn shutdown(&mut self) {
        self.leave_running();
    }

    // ── Side effects ─────────────────────────────────────────────────

    fn enter_running(&mut self) {
        self.next_tick += 1;
        let id = TickId(self.next_tick);
        self.active_tick = Some(id);
        self.ticker.schedule(id);
        self.awake.acquire();
        self.notifier.notify(NotificationKind::Start);
    }

    fn leave_running(&mut self) {
        if self.active_tick.take().is_some() {
            self.ticker.cancel();
        }
        self.awake.release();
    }

    fn render(&mut self) {
        debug_assert!(self.session.is_consistent(), "inconsistent session: {:?}", self.session);
        self.sink.render(&self.session.snapshot());
    }
}
