//! Synchronization probe

use crate::utils::error::Result;
use crate::work::Work;
use async_trait::async_trait;
use chrono::TimeDelta;
use std::sync::Arc;
use tracing::debug;

/// Source of the local clock's offset against a remote time server
#[async_trait]
pub trait ClockSource: Send + Sync + 'static {
    /// Offset of the local clock relative to `server` (positive: local clock ahead)
    async fn clock_offset(&self, server: &str) -> Result<TimeDelta>;
}

/// Outcome of one completed probe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeVerdict {
    /// Server that was queried
    pub server: String,
    /// Measured offset
    pub offset: TimeDelta,
    /// Largest offset still considered synchronized
    pub tolerance: TimeDelta,
    /// When the measurement completed
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl ProbeVerdict {
    /// Whether the measured offset is within tolerance
    pub fn is_synchronized(&self) -> bool {
        self.offset.abs() <= self.tolerance
    }
}

/// Work item measuring clock offset once
pub struct SyncProbe {
    server: String,
    tolerance: TimeDelta,
    source: Arc<dyn ClockSource>,
}

impl SyncProbe {
    pub fn new(server: impl Into<String>, tolerance: TimeDelta, source: Arc<dyn ClockSource>) -> Self {
        Self {
            server: server.into(),
            tolerance,
            source,
        }
    }
}

#[async_trait]
impl Work for SyncProbe {
    type Output = ProbeVerdict;

    fn name(&self) -> &str {
        "clock-sync-probe"
    }

    async fn run(&mut self) -> Result<ProbeVerdict> {
        let offset = self.source.clock_offset(&self.server).await?;
        debug!(
            server = %self.server,
            offset_ms = offset.num_milliseconds(),
            tolerance_ms = self.tolerance.num_milliseconds(),
            "Measured clock offset"
        );

        Ok(ProbeVerdict {
            server: self.server.clone(),
            offset,
            tolerance: self.tolerance,
            checked_at: chrono::Utc::now(),
        })
    }
}
