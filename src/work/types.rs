//! Work types and data structures

use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;

/// A unit of asynchronous work that can be retried
#[async_trait]
pub trait Work: Send + 'static {
    /// Value produced by a successful run
    type Output: Send + 'static;

    /// Human readable name used in logs
    fn name(&self) -> &str;

    /// Run one attempt
    async fn run(&mut self) -> Result<Self::Output>;
}

/// Identifier of a child within its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkId(pub(super) u64);

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "work-{}", self.0)
    }
}

/// Lifecycle of a child as seen by its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkState {
    /// Registered, not yet advanced
    Pending,
    /// An attempt is in progress
    Running { attempt: u32 },
    /// An attempt failed and another one is scheduled
    Retrying { attempt: u32, error: String },
    /// Finished with an output
    Success,
    /// Retry budget exhausted
    Failure { error: String },
}

impl WorkState {
    /// Whether no further transitions will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure { .. })
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running { .. } => "running",
            Self::Retrying { .. } => "retrying",
            Self::Success => "success",
            Self::Failure { .. } => "failure",
        }
    }
}

/// State change reported by a running child
#[derive(Debug)]
pub enum WorkUpdate<O> {
    Running { attempt: u32 },
    Retrying { attempt: u32, error: String },
    Succeeded(O),
    Failed { error: String },
}

/// Message from a child task to its parent
#[derive(Debug)]
pub struct WorkEvent<O> {
    /// Child that changed state
    pub id: WorkId,
    /// What happened
    pub update: WorkUpdate<O>,
}
