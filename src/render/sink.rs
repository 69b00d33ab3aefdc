//! Render sinks
//!
//! A sink receives one snapshot per state or remaining-time change and owns
//! whatever presentation it drives.

use tokio::sync::watch;
use tracing::debug;

use super::Frame;
use crate::state::Snapshot;

/// Consumer of session snapshots
pub trait RenderSink: Send {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Publishes the latest frame on a watch channel
#[derive(Debug)]
pub struct WatchSink {
    tx: watch::Sender<Frame>,
}

impl WatchSink {
    /// Create a sink and a receiver that always holds the latest frame
    pub fn new() -> (Self, watch::Receiver<Frame>) {
        let (tx, rx) = watch::channel(Frame::default());
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.tx.subscribe()
    }
}

impl RenderSink for WatchSink {
    fn render(&mut self, snapshot: &Snapshot) {
        // send_replace keeps publishing even while no receiver is attached
        self.tx.send_replace(Frame::compose(snapshot));
    }
}

/// Logs every frame at debug level
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn render(&mut self, snapshot: &Snapshot) {
        let frame = Frame::compose(snapshot);
        debug!(
            state = %frame.state,
            text = %frame.text,
            color = frame.color,
            layering = ?frame.layering,
            visible = frame.sector_visible,
            "frame"
        );
    }
}

/// Forwards each snapshot to several sinks in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn RenderSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl RenderSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl RenderSink for FanoutSink {
    fn render(&mut self, snapshot: &Snapshot) {
        for sink in &mut self.sinks {
            sink.render(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TimerSession, TimerState};
    use std::time::Duration;

    #[test]
    fn watch_sink_publishes_latest_frame() {
        let (mut sink, rx) = WatchSink::new();
        let mut session = TimerSession::with_total(Duration::from_secs(90), false);
        session.state = TimerState::Paused;
        session.remaining = Duration::from_secs(30);

        sink.render(&session.snapshot());

        let frame = rx.borrow().clone();
        assert_eq!(frame.state, TimerState::Paused);
        assert_eq!(frame.text, "0:30");
    }

    #[test]
    fn fanout_reaches_every_sink() {
        let (first, first_rx) = WatchSink::new();
        let (second, second_rx) = WatchSink::new();
        let mut fanout = FanoutSink::new().with(first).with(LogSink).with(second);

        let session = TimerSession::with_total(Duration::from_secs(5), true);
        fanout.render(&session.snapshot());

        assert_eq!(first_rx.borrow().text, "0:05");
        assert!(second_rx.borrow().dark_mode);
    }
}
