//! Core checker state machine

use crate::config::CheckerConfig;
use crate::issues::{Issue, IssueRegistry};
use crate::timer::{TimerExpired, VirtualTimer};
use crate::work::{RetryPolicy, WorkId, WorkParent};
use chrono::TimeDelta;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::probe::{ClockSource, ProbeVerdict, SyncProbe};
use super::types::{CheckerEvent, CheckerEvents, CheckerState, CheckerStatus};

/// Periodic clock synchronization checker.
///
/// The checker alternates between two states: *checking*, with exactly one
/// probe in flight, and *waiting*, with the recheck timer armed. It is never
/// in both. After [`shutdown`](Self::shutdown) neither a probe nor a timer is
/// ever started again.
///
/// The methods here are meant to be called from a single task; [`spawn`]
/// provides that loop.
///
/// [`spawn`]: super::spawn
pub struct NtpSynchronizationChecker {
    ntp_server: String,
    check_interval: Duration,
    slip_tolerance: TimeDelta,
    source: Arc<dyn ClockSource>,
    issues: Arc<dyn IssueRegistry>,
    work: WorkParent<SyncProbe>,
    /// Set only between launch and completion of a probe
    active_probe: Option<WorkId>,
    check_timer: VirtualTimer,
    is_shutdown: bool,
    checks_completed: u64,
    checks_failed: u64,
    last_verdict: Option<ProbeVerdict>,
}

impl NtpSynchronizationChecker {
    /// Create an idle checker together with the stream of events it must be fed
    pub fn new(
        config: &CheckerConfig,
        source: Arc<dyn ClockSource>,
        issues: Arc<dyn IssueRegistry>,
    ) -> (Self, CheckerEvents) {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (work_tx, work_rx) = mpsc::unbounded_channel();

        let checker = Self {
            ntp_server: config.ntp_server.clone(),
            check_interval: config.check_interval(),
            slip_tolerance: config.slip_tolerance(),
            source,
            issues,
            work: WorkParent::new(
                "ntp-synchronization-checker",
                RetryPolicy::from(&config.retry),
                work_tx,
            ),
            active_probe: None,
            check_timer: VirtualTimer::new(timer_tx),
            is_shutdown: false,
            checks_completed: 0,
            checks_failed: 0,
            last_verdict: None,
        };

        let events = CheckerEvents {
            timer: timer_rx,
            work: work_rx,
        };

        (checker, events)
    }

    /// Launch a probe unless one is already in flight or the checker is shut down.
    ///
    /// Must be called within a tokio runtime: the probe is spawned onto it.
    pub fn start(&mut self) {
        if self.is_shutdown {
            debug!(server = %self.ntp_server, "Checker is shut down, not starting");
            return;
        }
        if self.active_probe.is_some() {
            debug!(server = %self.ntp_server, "Probe already in flight");
            return;
        }

        // A manual start while waiting replaces the pending recheck.
        self.check_timer.cancel();

        let probe = SyncProbe::new(
            self.ntp_server.clone(),
            self.slip_tolerance,
            self.source.clone(),
        );
        let id = self.work.add_work(probe);
        self.active_probe = Some(id);

        info!(server = %self.ntp_server, %id, "Checking clock synchronization");
        self.work.advance_children();
    }

    /// React to a state change of an owned probe.
    ///
    /// Nothing happens until every child has finished; a probe that fails and
    /// is retried does not trigger a reschedule.
    pub fn notify(&mut self, id: WorkId) {
        if self.is_shutdown {
            trace!(%id, "Ignoring probe notification after shutdown");
            return;
        }

        if self.work.all_children_successful() {
            let verdict = self.active_probe.and_then(|probe| self.work.take_output(probe));
            self.work.clear_children();

            if let Some(verdict) = verdict {
                self.update_issue_manager(&verdict);
                self.checks_completed += 1;
                self.last_verdict = Some(verdict);
            }

            self.active_probe = None;
            self.schedule_next_check();
        } else if self.work.any_child_failed() {
            warn!(
                server = %self.ntp_server,
                %id,
                "Clock synchronization probe failed, keeping previous issue state"
            );
            self.work.clear_children();
            self.checks_failed += 1;
            self.active_probe = None;
            self.schedule_next_check();
        } else {
            trace!(%id, "Probe still in progress");
        }
    }

    /// Raise or clear the synchronization issue according to `verdict`
    fn update_issue_manager(&self, verdict: &ProbeVerdict) {
        if verdict.is_synchronized() {
            debug!(
                server = %verdict.server,
                offset_ms = verdict.offset.num_milliseconds(),
                "Clock is synchronized"
            );
            self.issues.remove_issue(Issue::TimeNotSynchronized);
        } else {
            warn!(
                server = %verdict.server,
                offset_ms = verdict.offset.num_milliseconds(),
                tolerance_ms = verdict.tolerance.num_milliseconds(),
                "Clock is not synchronized"
            );
            self.issues.add_issue(Issue::TimeNotSynchronized);
        }
    }

    fn schedule_next_check(&mut self) {
        if self.is_shutdown {
            return;
        }

        let generation = self.check_timer.arm_after(self.check_interval);
        debug!(
            server = %self.ntp_server,
            generation,
            interval_secs = self.check_interval.as_secs(),
            "Scheduled next clock check"
        );
    }

    /// React to an expiry of the recheck timer
    pub fn on_timer_expired(&mut self, expired: TimerExpired) {
        if !self.check_timer.fire(expired) {
            trace!(generation = expired.generation, "Ignoring stale timer expiry");
            return;
        }
        self.start();
    }

    /// Route an event from [`CheckerEvents`]
    pub fn handle_event(&mut self, event: CheckerEvent) {
        match event {
            CheckerEvent::TimerExpired(expired) => self.on_timer_expired(expired),
            CheckerEvent::Work(event) => {
                if let Some(id) = self.work.apply(event) {
                    self.notify(id);
                }
            }
        }
    }

    /// Stop checking. Abandons the in-flight probe and disarms the timer
    /// without waiting for either; repeated calls do nothing.
    pub fn shutdown(&mut self) {
        if self.is_shutdown {
            return;
        }

        info!(server = %self.ntp_server, "Shutting down clock synchronization checker");
        self.is_shutdown = true;
        self.work.clear_children();
        self.active_probe = None;
        self.check_timer.cancel();
    }

    pub fn state(&self) -> CheckerState {
        if self.is_shutdown {
            CheckerState::Shutdown
        } else if self.active_probe.is_some() {
            CheckerState::Checking
        } else if self.check_timer.is_armed() {
            CheckerState::Waiting
        } else {
            CheckerState::Idle
        }
    }

    pub fn status(&self) -> CheckerStatus {
        CheckerStatus {
            state: self.state(),
            checks_completed: self.checks_completed,
            checks_failed: self.checks_failed,
            last_verdict: self.last_verdict.clone(),
        }
    }

    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.is_shutdown
    }

    #[inline]
    pub fn has_active_probe(&self) -> bool {
        self.active_probe.is_some()
    }

    #[inline]
    pub fn has_pending_timer(&self) -> bool {
        self.check_timer.is_armed()
    }

    pub fn ntp_server(&self) -> &str {
        &self.ntp_server
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    pub fn slip_tolerance(&self) -> TimeDelta {
        self.slip_tolerance
    }
}
