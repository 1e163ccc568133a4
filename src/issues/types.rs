//! Issue types and data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Fault conditions that can be reported to an issue registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Issue {
    /// Local clock drifted beyond the accepted slip from the reference time source
    TimeNotSynchronized,
}

impl Issue {
    /// Every known issue kind
    pub const ALL: &'static [Issue] = &[Issue::TimeNotSynchronized];

    /// Stable machine readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Issue::TimeNotSynchronized => "time_not_synchronized",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueStats {
    /// Number of times an absent issue was raised
    pub total_raised: u64,
    /// Number of times a present issue was cleared
    pub total_cleared: u64,
    /// Time of the last actual change
    pub last_change: Option<chrono::DateTime<chrono::Utc>>,
}

/// Consolidated issue storage - single lock for related data
#[derive(Debug, Default)]
pub(super) struct IssueStorage {
    /// Currently raised issues
    pub active: BTreeSet<Issue>,
    /// Change statistics
    pub stats: IssueStats,
}
