//! Start and finish feedback
//!
//! Feedback is fire-and-forget: a blocked or missing audio device, or a
//! missing vibration motor, must never reach the state machine.

use std::{path::PathBuf, process::Stdio, time::Duration};

use serde::Serialize;
use tokio::{process::Command, runtime::Handle};
use tracing::{debug, warn};

use crate::error::TimerError;

/// Which cue to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Start,
    Finish,
}

impl NotificationKind {
    /// Vibration pattern as alternating pulse/pause lengths
    pub fn vibration_pattern(self) -> Vec<Duration> {
        match self {
            NotificationKind::Start => vec![Duration::from_millis(200)],
            NotificationKind::Finish => vec![
                Duration::from_millis(200),
                Duration::from_millis(100),
                Duration::from_millis(200),
            ],
        }
    }
}

/// Audio playback capability
pub trait AudioPlayer: Send {
    fn play(&mut self, kind: NotificationKind) -> Result<(), TimerError>;
}

/// Haptic capability
pub trait Vibrator: Send {
    fn vibrate(&mut self, pattern: &[Duration]) -> Result<(), TimerError>;
}

/// Fires the audio cue and, when present, the vibration pattern
pub struct Notifier {
    audio: Box<dyn AudioPlayer>,
    haptics: Option<Box<dyn Vibrator>>,
}

impl Notifier {
    pub fn new(audio: Box<dyn AudioPlayer>, haptics: Option<Box<dyn Vibrator>>) -> Self {
        Self { audio, haptics }
    }

    /// Notifier that makes no sound and has no haptics
    pub fn silent() -> Self {
        Self::new(Box::new(SilentPlayer), None)
    }

    pub fn notify(&mut self, kind: NotificationKind) {
        debug!("Dispatching {:?} notification", kind);

        if let Err(e) = self.audio.play(kind) {
            warn!("Audio cue for {:?} failed: {}", kind, e);
        }

        if let Some(haptics) = self.haptics.as_mut() {
            if let Err(e) = haptics.vibrate(&kind.vibration_pattern()) {
                warn!("Vibration for {:?} failed: {}", kind, e);
            }
        }
    }
}

/// Player that does nothing
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl AudioPlayer for SilentPlayer {
    fn play(&mut self, _kind: NotificationKind) -> Result<(), TimerError> {
        Ok(())
    }
}

/// Plays clips by spawning an external player such as `paplay`
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    start_clip: PathBuf,
    finish_clip: PathBuf,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, start_clip: PathBuf, finish_clip: PathBuf) -> Self {
        Self {
            program: program.into(),
            start_clip,
            finish_clip,
        }
    }

    fn clip(&self, kind: NotificationKind) -> &PathBuf {
        match kind {
            NotificationKind::Start => &self.start_clip,
            NotificationKind::Finish => &self.finish_clip,
        }
    }
}

impl AudioPlayer for CommandPlayer {
    fn play(&mut self, kind: NotificationKind) -> Result<(), TimerError> {
        let handle = Handle::try_current()
            .map_err(|_| TimerError::capability("audio", "no async runtime"))?;
        let clip = self.clip(kind);

        let child = Command::new(&self.program)
            .arg(clip)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TimerError::capability("audio", format!("failed to spawn {}: {e}", self.program)))?;

        let program = self.program.clone();
        handle.spawn(async move {
            match child.wait_with_output().await {
                Ok(output) if output.status.success() => {}
                Ok(output) => warn!(
                    "{} exited with {}: {}",
                    program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Log(Arc<Mutex<Vec<String>>>);

    struct FailingPlayer(Log);

    impl AudioPlayer for FailingPlayer {
        fn play(&mut self, kind: NotificationKind) -> Result<(), TimerError> {
            self.0 .0.lock().unwrap().push(format!("play {kind:?}"));
            Err(TimerError::capability("audio", "blocked by policy"))
        }
    }

    struct LoggingVibrator(Log);

    impl Vibrator for LoggingVibrator {
        fn vibrate(&mut self, pattern: &[Duration]) -> Result<(), TimerError> {
            let ms: Vec<u128> = pattern.iter().map(Duration::as_millis).collect();
            self.0 .0.lock().unwrap().push(format!("vibrate {ms:?}"));
            Ok(())
        }
    }

    #[test]
    fn audio_failure_still_vibrates() {
        let log = Log::default();
        let mut notifier = Notifier::new(
            Box::new(FailingPlayer(log.clone())),
            Some(Box::new(LoggingVibrator(log.clone()))),
        );

        notifier.notify(NotificationKind::Start);
        notifier.notify(NotificationKind::Finish);

        assert_eq!(
            *log.0.lock().unwrap(),
            vec![
                "play Start".to_string(),
                "vibrate [200]".to_string(),
                "play Finish".to_string(),
                "vibrate [200, 100, 200]".to_string(),
            ]
        );
    }

    #[test]
    fn missing_haptics_is_noop() {
        let mut notifier = Notifier::silent();
        notifier.notify(NotificationKind::Finish);
    }

    #[test]
    fn command_player_outside_runtime_reports_error() {
        let mut player = CommandPlayer::new("paplay", "a.oga".into(), "b.oga".into());
        assert!(player.play(NotificationKind::Start).is_err());
    }
}
