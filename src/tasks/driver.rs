//! Timer driver background task
//!
//! The driver owns the state machine and applies commands one at a time, so
//! a tick can never interleave with a half-finished transition.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::ticker::TickId;
use crate::state::{TimerInput, TimerMachine, TransitionEvent};

/// Everything the driver reacts to
#[derive(Debug)]
pub enum TimerCommand {
    /// User input; the reply carries the resulting transition
    Input {
        input: TimerInput,
        reply: oneshot::Sender<TransitionEvent>,
    },
    /// Periodic tick from the scheduler
    Tick(TickId),
    /// Stop ticking, release the awake lock and exit
    Shutdown,
}

/// Apply commands to `machine` until shutdown or until every sender is gone
pub async fn timer_driver_task(
    mut machine: TimerMachine,
    mut commands: mpsc::UnboundedReceiver<TimerCommand>,
) -> TimerMachine {
    info!("Starting timer driver task");

    while let Some(command) = commands.recv().await {
        match command {
            TimerCommand::Input { input, reply } => {
                debug!("Driver received {:?}", input);
                let event = machine.apply(input);
                if reply.send(event).is_err() {
                    warn!("Requester went away before {:?} was reported", event);
                }
            }
            TimerCommand::Tick(id) => {
                machine.on_tick(id);
            }
            TimerCommand::Shutdown => {
                info!("Timer driver shutting down");
                break;
            }
        }
    }

    machine.shutdown();
    info!("Timer driver stopped");
    machine
}
