//! Circle Timer - A single-session countdown timer with a circular control
//!
//! This is the main entry point for the circle-timer server.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::mpsc};
use tracing::info;

use circle_timer::{
    api::create_router,
    config::Config,
    render::{FanoutSink, LogSink, WatchSink},
    services::{
        AwakeLock, CommandPlayer, InhibitorProvider, JsonFileStore, Notifier, ScreensaverPoke,
    },
    state::{AppState, Collaborators, TimerMachine},
    tasks::{timer_driver_task, IntervalTicker},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("circle_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting circle-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, wake_lock={}, mute={}",
          config.host, config.port, !config.no_wake_lock, config.mute);

    let store = JsonFileStore::open(config.prefs_path());
    info!("Preferences at {}", store.path().display());

    let awake = if config.no_wake_lock {
        AwakeLock::disabled()
    } else {
        AwakeLock::new(Box::new(InhibitorProvider::new()), Box::new(ScreensaverPoke::new()))
    };

    let notifier = if config.mute {
        Notifier::silent()
    } else {
        let player = CommandPlayer::new(
            config.player.clone(),
            config.start_clip.clone(),
            config.finish_clip.clone(),
        );
        // No vibration motor on a desktop; haptics stay a no-op
        Notifier::new(Box::new(player), None)
    };

    let (watch_sink, frames) = WatchSink::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let machine = TimerMachine::restore(Collaborators {
        ticker: Box::new(IntervalTicker::new(command_tx.clone())),
        awake,
        notifier,
        sink: Box::new(FanoutSink::new().with(watch_sink).with(LogSink)),
        store: Box::new(store),
    });

    // The driver owns the timer; everything else talks to it through commands
    let driver = tokio::spawn(timer_driver_task(machine, command_rx));

    let state = Arc::new(AppState::new(config.port, config.host.clone(), command_tx, frames));
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /tap        - Start, pause, resume or reset the countdown");
    info!("  POST /duration   - Set minutes and seconds");
    info!("  POST /theme      - Toggle dark mode");
    info!("  POST /reset      - Reload the session from preferences");
    info!("  GET  /status     - Current frame and server status");
    info!("  GET  /widget.svg - Current frame as SVG");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.request_shutdown();
    let machine = driver.await?;
    info!("Final state: {}", machine.state());

    info!("Server shutdown complete");
    Ok(())
}
