//! Shared state handed to the HTTP layer

use std::{sync::Mutex, time::Instant};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::warn;

use super::{TimerInput, TransitionEvent};
use crate::{error::TimerError, render::Frame, tasks::TimerCommand};

/// Handle to the driver task plus server metadata.
///
/// The timer itself lives in the driver task; this side only sends commands
/// and reads the latest published frame.
#[derive(Debug)]
pub struct AppState {
    commands: mpsc::UnboundedSender<TimerCommand>,
    frames: watch::Receiver<Frame>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        commands: mpsc::UnboundedSender<TimerCommand>,
        frames: watch::Receiver<Frame>,
    ) -> Self {
        Self {
            commands,
            frames,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Send an input to the driver and wait until it has been applied
    pub async fn send(&self, action: &str, input: TimerInput) -> Result<TransitionEvent, TimerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(TimerCommand::Input { input, reply })
            .map_err(|_| TimerError::DriverClosed)?;
        let event = response.await.map_err(|_| TimerError::DriverClosed)?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(event)
    }

    /// Latest frame published by the render sink
    pub fn current_frame(&self) -> Frame {
        self.frames.borrow().clone()
    }

    /// Ask the driver to stop the countdown and release the awake lock
    pub fn request_shutdown(&self) {
        if self.commands.send(TimerCommand::Shutdown).is_err() {
            warn!("Timer driver already stopped");
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
