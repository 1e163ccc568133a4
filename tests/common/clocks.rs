//! Fake clock sources

use async_trait::async_trait;
use chrono::TimeDelta;
use ntp_checker::{CheckerError, ClockSource, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Notify;

/// Outcome of one scripted measurement
#[derive(Debug, Clone, Copy)]
pub enum Reading {
    Offset(TimeDelta),
    Unreachable,
}

impl Reading {
    pub fn synced() -> Self {
        Reading::Offset(TimeDelta::milliseconds(250))
    }

    pub fn drifted() -> Self {
        Reading::Offset(TimeDelta::minutes(5))
    }
}

/// Replays readings in order, then reports a zero offset forever
pub struct ScriptedClock {
    script: Mutex<VecDeque<Reading>>,
    calls: AtomicU32,
}

impl ScriptedClock {
    pub fn new(script: impl IntoIterator<Item = Reading>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicU32::new(0),
        })
    }

    /// Number of measurements taken so far
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClockSource for ScriptedClock {
    async fn clock_offset(&self, server: &str) -> Result<TimeDelta> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        match next {
            Some(Reading::Offset(offset)) => Ok(offset),
            Some(Reading::Unreachable) => {
                Err(CheckerError::probe(format!("{} unreachable", server)))
            }
            None => Ok(TimeDelta::zero()),
        }
    }
}

/// Blocks every measurement until released
pub struct GatedClock {
    offset: TimeDelta,
    gate: Notify,
    calls: AtomicU32,
}

impl GatedClock {
    pub fn new(offset: TimeDelta) -> Arc<Self> {
        Arc::new(Self {
            offset,
            gate: Notify::new(),
            calls: AtomicU32::new(0),
        })
    }

    /// Let one waiting (or the next) measurement complete
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClockSource for GatedClock {
    async fn clock_offset(&self, _server: &str) -> Result<TimeDelta> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.offset)
    }
}
