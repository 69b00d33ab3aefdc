//! Screen-awake coordination
//!
//! The timer asks for the screen to stay awake while it runs. A primary
//! inhibitor is tried first; when it is missing or refuses, a fallback
//! technique keeps the session from idling instead. Callers never see which
//! one is in use.

use std::{
    path::Path,
    process::Stdio,
    time::Duration,
};

use serde::Serialize;
use tokio::{
    process::{Child, Command},
    runtime::Handle,
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::error::TimerError;

/// A held primary lock
pub trait WakeLockHandle: Send {
    fn release(self: Box<Self>) -> Result<(), TimerError>;
}

/// Primary screen-awake capability
pub trait WakeLockProvider: Send {
    fn is_supported(&self) -> bool;
    fn request(&mut self) -> Result<Box<dyn WakeLockHandle>, TimerError>;
}

/// Fallback no-sleep capability
pub trait NoSleep: Send {
    fn enable(&mut self);
    fn disable(&mut self);
}

/// Which mechanism currently keeps the screen awake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mechanism {
    Primary,
    Fallback,
}

enum Held {
    Primary(Box<dyn WakeLockHandle>),
    Fallback,
}

/// Pairs every acquire with exactly one release across both mechanisms
pub struct AwakeLock {
    provider: Box<dyn WakeLockProvider>,
    fallback: Box<dyn NoSleep>,
    held: Option<Held>,
}

impl AwakeLock {
    pub fn new(provider: Box<dyn WakeLockProvider>, fallback: Box<dyn NoSleep>) -> Self {
        Self {
            provider,
            fallback,
            held: None,
        }
    }

    /// Coordinator with no capabilities at all
    pub fn disabled() -> Self {
        Self::new(Box::new(Unsupported), Box::new(NoopNoSleep))
    }

    /// Keep the screen awake. Holding already is a no-op.
    pub fn acquire(&mut self) {
        if self.held.is_some() {
            debug!("Awake lock already held, ignoring acquire");
            return;
        }

        if !self.provider.is_supported() {
            self.fallback.enable();
            info!("No wake lock support, using no-sleep fallback");
            self.held = Some(Held::Fallback);
            return;
        }

        match self.provider.request() {
            Ok(handle) => {
                info!("Wake lock active");
                self.held = Some(Held::Primary(handle));
            }
            Err(e) => {
                warn!("Wake lock request failed, falling back to no-sleep: {}", e);
                self.fallback.enable();
                self.held = Some(Held::Fallback);
            }
        }
    }

    /// Let the screen sleep again. Releasing with nothing held is a no-op.
    pub fn release(&mut self) {
        match self.held.take() {
            Some(Held::Primary(handle)) => match handle.release() {
                Ok(()) => info!("Wake lock released"),
                Err(e) => warn!("Error releasing wake lock: {}", e),
            },
            Some(Held::Fallback) => {
                self.fallback.disable();
                info!("No-sleep fallback disabled");
            }
            None => debug!("Awake lock not held, ignoring release"),
        }
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    pub fn mechanism(&self) -> Option<Mechanism> {
        self.held.as_ref().map(|held| match held {
            Held::Primary(_) => Mechanism::Primary,
            Held::Fallback => Mechanism::Fallback,
        })
    }
}

impl Drop for AwakeLock {
    fn drop(&mut self) {
        self.release();
    }
}

/// Provider for platforms without a primary capability
#[derive(Debug, Default)]
pub struct Unsupported;

impl WakeLockProvider for Unsupported {
    fn is_supported(&self) -> bool {
        false
    }

    fn request(&mut self) -> Result<Box<dyn WakeLockHandle>, TimerError> {
        Err(TimerError::Unsupported("wake-lock"))
    }
}

/// Fallback that does nothing
#[derive(Debug, Default)]
pub struct NoopNoSleep;

impl NoSleep for NoopNoSleep {
    fn enable(&mut self) {}
    fn disable(&mut self) {}
}

/// Check whether an executable is reachable through `PATH`
pub fn binary_on_path(name: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(name).is_file()))
        .unwrap_or(false)
}

/// Primary lock backed by a `systemd-inhibit` child process.
///
/// The inhibitor holds an idle/sleep block for as long as the child lives.
#[derive(Debug)]
pub struct InhibitorProvider {
    program: String,
    why: String,
}

impl InhibitorProvider {
    pub fn new() -> Self {
        Self {
            program: "systemd-inhibit".to_string(),
            why: "Countdown running".to_string(),
        }
    }
}

impl Default for InhibitorProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeLockProvider for InhibitorProvider {
    fn is_supported(&self) -> bool {
        Handle::try_current().is_ok()
            && (Path::new(&self.program).is_file() || binary_on_path(&self.program))
    }

    fn request(&mut self) -> Result<Box<dyn WakeLockHandle>, TimerError> {
        debug!("Spawning {}", self.program);

        let child = Command::new(&self.program)
            .args([
                "--what=idle:sleep",
                "--who=circle-timer",
                "--mode=block",
            ])
            .arg(format!("--why={}", self.why))
            .args(["sleep", "infinity"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TimerError::capability("wake-lock", format!("failed to spawn inhibitor: {e}")))?;

        Ok(Box::new(InhibitorHandle { child }))
    }
}

struct InhibitorHandle {
    child: Child,
}

impl WakeLockHandle for InhibitorHandle {
    fn release(self: Box<Self>) -> Result<(), TimerError> {
        let InhibitorHandle { mut child } = *self;

        if let Ok(Some(status)) = child.try_wait() {
            warn!("Inhibitor had already exited with {}", status);
            return Ok(());
        }

        child
            .start_kill()
            .map_err(|e| TimerError::capability("wake-lock", format!("failed to stop inhibitor: {e}")))?;

        if let Ok(handle) = Handle::try_current() {
            handle.spawn(async move {
                if child.wait().await.is_ok() {
                    debug!("Wake lock was released");
                }
            });
        }
        Ok(())
    }
}

/// Fallback that periodically resets the screensaver idle timer
pub struct ScreensaverPoke {
    program: String,
    every: Duration,
    task: Option<JoinHandle<()>>,
}

impl ScreensaverPoke {
    pub fn new() -> Self {
        Self {
            program: "xdg-screensaver".to_string(),
            every: Duration::from_secs(30),
            task: None,
        }
    }
}

impl Default for ScreensaverPoke {
    fn default() -> Self {
        Self::new()
    }
}

impl NoSleep for ScreensaverPoke {
    fn enable(&mut self) {
        if self.task.is_some() {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            warn!("No runtime available, no-sleep fallback inactive");
            return;
        };

        let program = self.program.clone();
        let every = self.every;
        self.task = Some(handle.spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                match Command::new(&program).arg("reset").output().await {
                    Ok(output) if output.status.success() => debug!("Screensaver idle timer reset"),
                    Ok(output) => debug!("{} reset exited with {}", program, output.status),
                    Err(e) => {
                        warn!("Failed to run {}: {}", program, e);
                        break;
                    }
                }
            }
        }));
    }

    fn disable(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ScreensaverPoke {
    fn drop(&mut self) {
        self.disable();
    }
}
