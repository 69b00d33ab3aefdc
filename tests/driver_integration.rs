use std::time::Duration;

use circle_timer::{
    render::WatchSink,
    services::MemoryStore,
    state::{Collaborators, DurationSelection, TimerInput, TimerMachine, TimerSession, TimerState, TransitionEvent},
    tasks::{timer_driver_task, IntervalTicker, TimerCommand},
    testing::{FakeWakeLock, RecordingFeedback},
};
use tokio::sync::{mpsc, oneshot, watch};

struct Running {
    commands: mpsc::UnboundedSender<TimerCommand>,
    frames: watch::Receiver<circle_timer::render::Frame>,
    driver: tokio::task::JoinHandle<TimerMachine>,
    lock: FakeWakeLock,
}

fn spawn_driver(total: Duration) -> Running {
    let (commands, rx) = mpsc::unbounded_channel();
    let (sink, frames) = WatchSink::new();
    let lock = FakeWakeLock::default();

    let machine = TimerMachine::new(
        TimerSession::with_total(total, false),
        Collaborators {
            ticker: Box::new(IntervalTicker::new(commands.clone())),
            awake: lock.coordinator(),
            notifier: RecordingFeedback::default().notifier(),
            sink: Box::new(sink),
            store: Box::new(MemoryStore::new()),
        },
    );

    Running {
        commands,
        frames,
        driver: tokio::spawn(timer_driver_task(machine, rx)),
        lock,
    }
}

async fn send(commands: &mpsc::UnboundedSender<TimerCommand>, input: TimerInput) -> TransitionEvent {
    let (reply, response) = oneshot::channel();
    commands.send(TimerCommand::Input { input, reply }).unwrap();
    response.await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn countdown_runs_to_finished() {
    let run = spawn_driver(Duration::from_secs(1));

    assert_eq!(send(&run.commands, TimerInput::Tap).await, TransitionEvent::Started);
    tokio::time::sleep(Duration::from_millis(1_550)).await;

    let frame = run.frames.borrow().clone();
    assert_eq!(frame.state, TimerState::Finished);
    assert_eq!(frame.remaining_seconds, 0.0);
    assert_eq!(run.lock.counts().outstanding(), 0);

    run.commands.send(TimerCommand::Shutdown).unwrap();
    let machine = run.driver.await.unwrap();
    assert_eq!(machine.state(), TimerState::Finished);
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_remaining_time() {
    let run = spawn_driver(Duration::from_secs(5));

    send(&run.commands, TimerInput::Tap).await;
    tokio::time::sleep(Duration::from_millis(1_850)).await;
    assert_eq!(send(&run.commands, TimerInput::Tap).await, TransitionEvent::Paused);

    let paused_at = run.frames.borrow().remaining_seconds;
    assert!(paused_at < 5.0);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(run.frames.borrow().remaining_seconds, paused_at);
    assert_eq!(run.frames.borrow().state, TimerState::Paused);

    run.commands.send(TimerCommand::Shutdown).unwrap();
    run.driver.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn duration_change_while_running_stops_countdown() {
    let run = spawn_driver(Duration::from_secs(10));

    send(&run.commands, TimerInput::Tap).await;
    tokio::time::sleep(Duration::from_millis(750)).await;

    let selection = DurationSelection::new(1, 0).unwrap();
    assert_eq!(
        send(&run.commands, TimerInput::SetDuration(selection)).await,
        TransitionEvent::DurationChanged { interrupted: true }
    );

    tokio::time::sleep(Duration::from_secs(2)).await;
    let frame = run.frames.borrow().clone();
    assert_eq!(frame.state, TimerState::Idle);
    assert_eq!(frame.remaining_seconds, 60.0);
    assert_eq!(frame.text, "1:00");
    assert_eq!(run.lock.counts().outstanding(), 0);

    run.commands.send(TimerCommand::Shutdown).unwrap();
    run.driver.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_while_running_releases_lock() {
    let run = spawn_driver(Duration::from_secs(10));

    send(&run.commands, TimerInput::Tap).await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(run.lock.counts().outstanding(), 1);

    run.commands.send(TimerCommand::Shutdown).unwrap();
    let machine = run.driver.await.unwrap();
    assert_eq!(machine.active_tick(), None);
    assert_eq!(run.lock.counts().outstanding(), 0);
}
