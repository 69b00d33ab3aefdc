//! Recording fakes for exercising the timer without a platform.
//!
//! Every fake is cheap to clone and clones share their log, so a test keeps
//! one copy while the machine owns the other.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{
    error::TimerError,
    render::{Frame, RenderSink},
    services::{
        AudioPlayer, AwakeLock, MemoryStore, NoSleep, NotificationKind, Notifier, Vibrator,
        WakeLockHandle, WakeLockProvider,
    },
    state::{Collaborators, Snapshot, TimerMachine, TimerSession},
    tasks::{TickId, TickScheduler},
};

/// Scheduler that records schedules and cancellations instead of spawning
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    log: Arc<Mutex<TickLog>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickLog {
    pub active: Option<TickId>,
    pub scheduled: usize,
    pub cancelled: usize,
}

impl ManualTicker {
    pub fn log(&self) -> TickLog {
        self.log.lock().unwrap().clone()
    }
}

impl TickScheduler for ManualTicker {
    fn schedule(&mut self, id: TickId) {
        let mut log = self.log.lock().unwrap();
        log.active = Some(id);
        log.scheduled += 1;
    }

    fn cancel(&mut self) {
        let mut log = self.log.lock().unwrap();
        if log.active.take().is_some() {
            log.cancelled += 1;
        }
    }
}

/// Counters shared by the wake-lock fakes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockCounts {
    pub acquired: usize,
    pub released: usize,
    pub fallback_enabled: usize,
    pub fallback_disabled: usize,
}

impl LockCounts {
    /// Held acquisitions across both mechanisms
    pub fn outstanding(&self) -> isize {
        (self.acquired + self.fallback_enabled) as isize
            - (self.released + self.fallback_disabled) as isize
    }
}

/// Wake-lock provider that can be told to refuse requests
#[derive(Debug, Clone, Default)]
pub struct FakeWakeLock {
    counts: Arc<Mutex<LockCounts>>,
    refuse: bool,
    unsupported: bool,
}

impl FakeWakeLock {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    pub fn counts(&self) -> LockCounts {
        self.counts.lock().unwrap().clone()
    }

    /// Coordinator using this fake for both the primary and the fallback
    pub fn coordinator(&self) -> AwakeLock {
        AwakeLock::new(Box::new(self.clone()), Box::new(self.clone()))
    }
}

struct FakeHandle(Arc<Mutex<LockCounts>>);

impl WakeLockHandle for FakeHandle {
    fn release(self: Box<Self>) -> Result<(), TimerError> {
        self.0.lock().unwrap().released += 1;
        Ok(())
    }
}

impl WakeLockProvider for FakeWakeLock {
    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    fn request(&mut self) -> Result<Box<dyn WakeLockHandle>, TimerError> {
        if self.refuse {
            return Err(TimerError::capability("wake-lock", "request rejected"));
        }
        self.counts.lock().unwrap().acquired += 1;
        Ok(Box::new(FakeHandle(Arc::clone(&self.counts))))
    }
}

impl NoSleep for FakeWakeLock {
    fn enable(&mut self) {
        self.counts.lock().unwrap().fallback_enabled += 1;
    }

    fn disable(&mut self) {
        self.counts.lock().unwrap().fallback_disabled += 1;
    }
}

/// What the feedback fakes observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Sound(NotificationKind),
    Vibration(Vec<Duration>),
}

/// Audio and haptics fake; optionally fails every playback
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    log: Arc<Mutex<Vec<Feedback>>>,
    audio_blocked: bool,
}

impl RecordingFeedback {
    pub fn blocked() -> Self {
        Self {
            audio_blocked: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Feedback> {
        self.log.lock().unwrap().clone()
    }

    pub fn sounds(&self) -> Vec<NotificationKind> {
        self.events()
            .into_iter()
            .filter_map(|f| match f {
                Feedback::Sound(kind) => Some(kind),
                Feedback::Vibration(_) => None,
            })
            .collect()
    }

    pub fn notifier(&self) -> Notifier {
        Notifier::new(Box::new(self.clone()), Some(Box::new(self.clone())))
    }
}

impl AudioPlayer for RecordingFeedback {
    fn play(&mut self, kind: NotificationKind) -> Result<(), TimerError> {
        self.log.lock().unwrap().push(Feedback::Sound(kind));
        if self.audio_blocked {
            return Err(TimerError::capability("audio", "autoplay blocked"));
        }
        Ok(())
    }
}

impl Vibrator for RecordingFeedback {
    fn vibrate(&mut self, pattern: &[Duration]) -> Result<(), TimerError> {
        self.log.lock().unwrap().push(Feedback::Vibration(pattern.to_vec()));
        Ok(())
    }
}

/// Sink keeping every snapshot and the frame composed from it
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<(Snapshot, Frame)>>>,
}

impl RecordingSink {
    pub fn count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().unwrap().last().map(|(_, frame)| frame.clone())
    }

    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.frames.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames
            .lock()
            .unwrap()
            .push((*snapshot, Frame::compose(snapshot)));
    }
}

/// A machine wired to fakes, with handles to inspect every collaborator
pub struct Harness {
    pub machine: TimerMachine,
    pub ticker: ManualTicker,
    pub lock: FakeWakeLock,
    pub feedback: RecordingFeedback,
    pub sink: RecordingSink,
    pub store: MemoryStore,
}

impl Harness {
    pub fn new(session: TimerSession) -> Self {
        Self::build(session, FakeWakeLock::default(), RecordingFeedback::default(), MemoryStore::new())
    }

    /// Harness whose machine is restored from `store`
    pub fn restored(store: MemoryStore) -> Self {
        let ticker = ManualTicker::default();
        let lock = FakeWakeLock::default();
        let feedback = RecordingFeedback::default();
        let sink = RecordingSink::default();
        let machine = TimerMachine::restore(Collaborators {
            ticker: Box::new(ticker.clone()),
            awake: lock.coordinator(),
            notifier: feedback.notifier(),
            sink: Box::new(sink.clone()),
            store: Box::new(store.clone()),
        });
        Self {
            machine,
            ticker,
            lock,
            feedback,
            sink,
            store,
        }
    }

    pub fn build(
        session: TimerSession,
        lock: FakeWakeLock,
        feedback: RecordingFeedback,
        store: MemoryStore,
    ) -> Self {
        let ticker = ManualTicker::default();
        let sink = RecordingSink::default();
        let machine = TimerMachine::new(
            session,
            Collaborators {
                ticker: Box::new(ticker.clone()),
                awake: lock.coordinator(),
                notifier: feedback.notifier(),
                sink: Box::new(sink.clone()),
                store: Box::new(store.clone()),
            },
        );
        Self {
            machine,
            ticker,
            lock,
            feedback,
            sink,
            store,
        }
    }

    /// Deliver one tick from the active schedule, if any
    pub fn tick(&mut self) -> bool {
        match self.ticker.log().active {
            Some(id) => self.machine.on_tick(id).is_some(),
            None => false,
        }
    }

    /// Deliver `n` ticks, stopping early once no schedule is active
    pub fn ticks(&mut self, n: usize) -> usize {
        (0..n).take_while(|_| self.tick()).count()
    }
}
