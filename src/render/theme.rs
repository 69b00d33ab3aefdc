//! Theme resolution for the circular control

use serde::Serialize;

use crate::state::TimerState;

/// Hex color string such as `#007ACC`
pub type Color = &'static str;

/// Light or dark palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    /// Sector color for a timer state
    pub fn resolve(self, state: TimerState) -> Color {
        match (self, state) {
            (Theme::Light, TimerState::Idle) => "#007ACC",
            (Theme::Light, TimerState::Running) => "#267F99",
            (Theme::Light, TimerState::Paused) => "#9C4CAD",
            (Theme::Light, TimerState::Finished) => "#B24747",
            (Theme::Dark, TimerState::Idle) => "#3794FF",
            (Theme::Dark, TimerState::Running) => "#4EC9B0",
            (Theme::Dark, TimerState::Paused) => "#C586C0",
            (Theme::Dark, TimerState::Finished) => "#F14C4C",
        }
    }

    /// Background track drawn under (or over) the sector
    pub fn track(self) -> Color {
        match self {
            Theme::Light => "#EAEAEA",
            Theme::Dark => "#333333",
        }
    }

    /// Page background
    pub fn background(self) -> Color {
        match self {
            Theme::Light => "#FFFFFF",
            Theme::Dark => "#1E1E1E",
        }
    }

    /// Timer text
    pub fn text(self) -> Color {
        match self {
            Theme::Light => "#1F1F1F",
            Theme::Dark => "#CCCCCC",
        }
    }
}

/// Resolve the sector color for `(state, dark_mode)`
pub fn resolve_color(state: TimerState, dark_mode: bool) -> Color {
    Theme::from_dark_mode(dark_mode).resolve(state)
}
