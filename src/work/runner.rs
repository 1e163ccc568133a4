//! Child task execution with retry and backoff

use crate::config::RetryConfig;
use std::time::Duration;
use tokio::sync::mpsc::WeakUnboundedSender;
use tracing::{debug, warn};

use super::types::{Work, WorkEvent, WorkId, WorkUpdate};

/// Retry policy applied to every child of a parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound on any delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after the failed `attempt` (0-based), doubling each time
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

/// Drive one child to a terminal state, reporting each transition.
///
/// Returns early once the parent has gone away.
pub(super) async fn run_child<W: Work>(
    id: WorkId,
    mut work: W,
    policy: RetryPolicy,
    parent: WeakUnboundedSender<WorkEvent<W::Output>>,
) {
    let mut attempt = 0;

    loop {
        if !report(&parent, id, WorkUpdate::Running { attempt }) {
            return;
        }

        match work.run().await {
            Ok(output) => {
                debug!(work = %work.name(), %id, attempt, "Work succeeded");
                report(&parent, id, WorkUpdate::Succeeded(output));
                return;
            }
            Err(e) if attempt < policy.max_retries => {
                let delay = policy.backoff(attempt);
                warn!(
                    work = %work.name(),
                    %id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Work failed, retrying"
                );
                let error = e.to_string();
                if !report(&parent, id, WorkUpdate::Retrying { attempt, error }) {
                    return;
                }
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(work = %work.name(), %id, attempt, error = %e, "Work failed, giving up");
                report(&parent, id, WorkUpdate::Failed { error: e.to_string() });
                return;
            }
        }
    }
}

fn report<O>(
    parent: &WeakUnboundedSender<WorkEvent<O>>,
    id: WorkId,
    update: WorkUpdate<O>,
) -> bool {
    match parent.upgrade() {
        Some(sender) => sender.send(WorkEvent { id, update }).is_ok(),
        None => {
            debug!(%id, "Parent dropped, abandoning work");
            false
        }
    }
}
