//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{render::Frame, state::TransitionEvent};

/// Body of POST /duration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DurationRequest {
    pub minutes: u8,
    pub seconds: u8,
}

/// Body of POST /theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThemeRequest {
    pub dark: bool,
}

/// Response for every input endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub event: TransitionEvent,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub frame: Frame,
}

impl ApiResponse {
    pub fn new(event: TransitionEvent, message: String, frame: Frame) -> Self {
        Self {
            event,
            message,
            timestamp: Utc::now(),
            frame,
        }
    }
}

/// Status response with the current frame and server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub frame: Frame,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Error body for rejected input
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
