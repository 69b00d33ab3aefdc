//! Countdown tick scheduling

use std::{fmt, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::debug;

use super::TimerCommand;

/// Wall-clock period between ticks, also the simulated time each tick removes
pub const TICK_QUANTUM: Duration = Duration::from_millis(100);

/// Identifies one schedule; ticks from older schedules are discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source of periodic ticks for the state machine
pub trait TickScheduler: Send {
    /// Begin delivering ticks tagged with `id`, replacing any prior schedule
    fn schedule(&mut self, id: TickId);
    /// Stop delivering ticks; no tick is produced after this returns
    fn cancel(&mut self);
}

/// Tokio interval task feeding `TimerCommand::Tick` into the driver channel
#[derive(Debug)]
pub struct IntervalTicker {
    tx: mpsc::UnboundedSender<TimerCommand>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    pub fn new(tx: mpsc::UnboundedSender<TimerCommand>) -> Self {
        Self::with_period(tx, TICK_QUANTUM)
    }

    pub fn with_period(tx: mpsc::UnboundedSender<TimerCommand>, period: Duration) -> Self {
        Self {
            tx,
            period,
            task: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

impl TickScheduler for IntervalTicker {
    fn schedule(&mut self, id: TickId) {
        self.cancel();

        let tx = self.tx.clone();
        let period = self.period;
        debug!("Scheduling tick {} every {:?}", id, period);

        self.task = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(TimerCommand::Tick(id)).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Tick cancelled");
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delivers_tagged_ticks_until_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = IntervalTicker::new(tx);

        ticker.schedule(TickId(7));
        tokio::time::sleep(Duration::from_millis(350)).await;
        ticker.cancel();

        let mut ids = Vec::new();
        while let Ok(command) = rx.try_recv() {
            if let TimerCommand::Tick(id) = command {
                ids.push(id);
            }
        }
        assert_eq!(ids, vec![TickId(7); 3]);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert!(!ticker.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_previous_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = IntervalTicker::new(tx);

        ticker.schedule(TickId(1));
        ticker.schedule(TickId(2));
        tokio::time::sleep(Duration::from_millis(150)).await;
        ticker.cancel();

        let mut ids = Vec::new();
        while let Ok(TimerCommand::Tick(id)) = rx.try_recv() {
            ids.push(id);
        }
        assert_eq!(ids, vec![TickId(2)]);
    }
}
