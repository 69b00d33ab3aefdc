//! State management module
//!
//! This module contains the timer session, the state machine that owns it,
//! and the shared state handed to the HTTP layer.

pub mod app_state;
pub mod machine;
pub mod session;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use machine::{Collaborators, TimerInput, TimerMachine, TransitionEvent};
pub use session::{DurationSelection, Snapshot, TimerSession, MAX_SELECTOR};
pub use timer_state::TimerState;
