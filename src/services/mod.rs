//! External capability module
//!
//! This module contains the collaborators the timer drives but does not own:
//! the screen-awake lock, audio/haptic feedback and preference persistence.

pub mod notify;
pub mod prefs;
pub mod wake_lock;

// Re-export main types
pub use notify::{AudioPlayer, CommandPlayer, NotificationKind, Notifier, SilentPlayer, Vibrator};
pub use prefs::{JsonFileStore, MemoryStore, PreferenceStore, Preferences};
pub use wake_lock::{
    AwakeLock, InhibitorProvider, Mechanism, NoSleep, NoopNoSleep, ScreensaverPoke, Unsupported,
    WakeLockHandle, WakeLockProvider,
};
