//! Circle Timer - A single-session countdown timer with a circular control
//!
//! This library provides the timer state machine and the pieces it drives:
//! arc geometry, time text and theme colors for rendering, a screen-awake
//! coordinator with fallback, start/finish feedback and preference storage.

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "testing-support"))]
pub mod testing;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, TimerMachine, TimerSession, TimerState};
pub use utils::signals::shutdown_signal;
