//! One-shot timer delivering expiries as events
//!
//! Arming a [`VirtualTimer`] spawns a sleeping tokio task. When the sleep
//! finishes the task sends a [`TimerExpired`] to the owner through a weak
//! sender, so an expiry that outlives its owner is silently dropped. Every arm
//! gets its own [`CancellationToken`], derived from a token that lives as long
//! as the timer itself.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Expiry notification for one arming of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerExpired {
    /// Arming this expiry belongs to
    pub generation: u64,
}

#[derive(Debug)]
struct Armed {
    generation: u64,
    token: CancellationToken,
}

/// Cancellable one-shot timer
#[derive(Debug)]
pub struct VirtualTimer {
    /// Cancelled when the timer is dropped
    lifetime: CancellationToken,
    armed: Option<Armed>,
    next_generation: u64,
    expiries: UnboundedSender<TimerExpired>,
}

impl VirtualTimer {
    /// Create a disarmed timer reporting to `expiries`
    pub fn new(expiries: UnboundedSender<TimerExpired>) -> Self {
        Self {
            lifetime: CancellationToken::new(),
            armed: None,
            next_generation: 0,
            expiries,
        }
    }

    /// Arm the timer, replacing any previous arming.
    ///
    /// Returns the generation carried by the resulting expiry.
    pub fn arm_after(&mut self, after: Duration) -> u64 {
        self.cancel();

        let generation = self.next_generation;
        self.next_generation += 1;

        let token = self.lifetime.child_token();
        let cancelled = token.clone();
        let owner = self.expiries.downgrade();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    trace!(generation, "Timer cancelled");
                }
                _ = tokio::time::sleep(after) => {
                    match owner.upgrade() {
                        Some(sender) => {
                            let _ = sender.send(TimerExpired { generation });
                        }
                        None => trace!(generation, "Timer owner gone, dropping expiry"),
                    }
                }
            }
        });

        self.armed = Some(Armed { generation, token });
        generation
    }

    /// Disarm the timer. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        match self.armed.take() {
            Some(armed) => {
                armed.token.cancel();
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Accept an expiry.
    ///
    /// Only the expiry of the current arming is accepted, and only once; stale
    /// or cancelled generations return `false`.
    pub fn fire(&mut self, expired: TimerExpired) -> bool {
        let current = self.armed.as_ref().map(|armed| armed.generation);
        if current == Some(expired.generation) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

impl Drop for VirtualTimer {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
