//! Error types for the timer core.
//!
//! Nothing here is fatal to the countdown: capability errors are logged by the
//! coordinator and dispatcher, and preference errors fall back to defaults.

use thiserror::Error;

/// Core error type for circle-timer.
#[derive(Error, Debug)]
pub enum TimerError {
    /// IO errors from the preference file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Selector values out of range or unparseable stored duration
    #[error("Invalid duration selection: {0}")]
    InvalidSelection(String),

    /// Optional platform capability is not present
    #[error("Capability '{0}' is not supported")]
    Unsupported(&'static str),

    /// Optional platform capability was present but the request failed
    #[error("Capability '{capability}' failed: {message}")]
    Capability {
        capability: &'static str,
        message: String,
    },

    /// Shared preference map lock was poisoned
    #[error("Preference store lock poisoned")]
    StorePoisoned,

    /// The driver task has stopped and no longer accepts commands
    #[error("Timer driver is not running")]
    DriverClosed,
}

impl TimerError {
    pub fn capability(capability: &'static str, message: impl Into<String>) -> Self {
        Self::Capability {
            capability,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimerError>;
