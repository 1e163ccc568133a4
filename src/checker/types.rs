//! Checker types and data structures

use std::fmt;
use tokio::sync::mpsc::UnboundedReceiver;

use super::probe::ProbeVerdict;
use crate::timer::TimerExpired;
use crate::work::WorkEvent;

/// Lifecycle state of the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerState {
    /// Constructed, never started
    Idle,
    /// A probe is in flight
    Checking,
    /// The timer is armed for the next check
    Waiting,
    /// Terminal
    Shutdown,
}

impl CheckerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Checking => "checking",
            Self::Waiting => "waiting",
            Self::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for CheckerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of the checker
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerStatus {
    pub state: CheckerState,
    /// Probes that produced a verdict
    pub checks_completed: u64,
    /// Probes that exhausted their retries
    pub checks_failed: u64,
    /// Most recent verdict
    pub last_verdict: Option<ProbeVerdict>,
}

/// Everything the checker reacts to besides direct calls
#[derive(Debug)]
pub enum CheckerEvent {
    /// The recheck timer expired
    TimerExpired(TimerExpired),
    /// The probe changed state
    Work(WorkEvent<ProbeVerdict>),
}

/// Receiving side of the checker's timer and probe notifications.
///
/// The matching senders are owned by the checker, so the stream ends once the
/// checker is dropped.
#[derive(Debug)]
pub struct CheckerEvents {
    pub(super) timer: UnboundedReceiver<TimerExpired>,
    pub(super) work: UnboundedReceiver<WorkEvent<ProbeVerdict>>,
}

impl CheckerEvents {
    /// Wait for the next event, or `None` once the checker is gone
    pub async fn next(&mut self) -> Option<CheckerEvent> {
        tokio::select! {
            Some(expired) = self.timer.recv() => Some(CheckerEvent::TimerExpired(expired)),
            Some(event) = self.work.recv() => Some(CheckerEvent::Work(event)),
            else => None,
        }
    }

    /// Take an already delivered event without waiting
    pub fn try_next(&mut self) -> Option<CheckerEvent> {
        if let Ok(expired) = self.timer.try_recv() {
            return Some(CheckerEvent::TimerExpired(expired));
        }
        self.work.try_recv().ok().map(CheckerEvent::Work)
    }
}
