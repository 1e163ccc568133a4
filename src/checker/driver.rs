//! Event loop running a checker on a single task

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::checker::NtpSynchronizationChecker;
use super::types::{CheckerEvents, CheckerStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Shutdown,
}

/// Handle to a checker running on its own task.
///
/// Dropping the handle shuts the checker down.
#[derive(Debug)]
pub struct CheckerHandle {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<CheckerStatus>,
    task: JoinHandle<()>,
}

/// Move `checker` onto a tokio task that owns it and feeds it `events`.
///
/// Every checker method, timer expiry and probe notification is handled on
/// that one task, in arrival order.
pub fn spawn(mut checker: NtpSynchronizationChecker, mut events: CheckerEvents) -> CheckerHandle {
    let (commands, mut command_rx) = mpsc::unbounded_channel();
    let (status_tx, status) = watch::channel(checker.status());

    let task = tokio::spawn(async move {
        debug!(server = %checker.ntp_server(), "Checker loop started");

        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(Command::Start) => checker.start(),
                    Some(Command::Shutdown) | None => {
                        checker.shutdown();
                        status_tx.send_replace(checker.status());
                        break;
                    }
                },
                Some(event) = events.next() => checker.handle_event(event),
            }

            status_tx.send_replace(checker.status());
        }

        debug!(server = %checker.ntp_server(), "Checker loop stopped");
    });

    CheckerHandle {
        commands,
        status,
        task,
    }
}

impl CheckerHandle {
    /// Ask the checker to launch a probe now
    pub fn start(&self) {
        let _ = self.commands.send(Command::Start);
    }

    /// Ask the checker to stop. Calling this more than once is harmless.
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    /// Latest published status
    pub fn status(&self) -> CheckerStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified after every handled event
    pub fn subscribe(&self) -> watch::Receiver<CheckerStatus> {
        self.status.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to exit. Does not request shutdown by itself.
    pub async fn join(self) {
        let Self { commands, task, .. } = self;
        // Keep the command channel open so joining never implies shutdown.
        let _commands = commands;
        if let Err(e) = task.await {
            error!("Checker task failed: {}", e);
        }
    }
}
