//! In-memory issue registry

use super::registry::IssueRegistry;
use super::types::{Issue, IssueStats, IssueStorage};
use parking_lot::RwLock;
use tracing::{info, warn};

/// In-memory issue registry
#[derive(Debug, Default)]
pub struct IssueManager {
    /// Consolidated storage for all issue-related data
    storage: RwLock<IssueStorage>,
}

impl IssueManager {
    /// Create an empty issue manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Get issue statistics
    pub fn stats(&self) -> IssueStats {
        self.storage.read().stats.clone()
    }

    /// Whether no issue is currently raised
    pub fn is_clear(&self) -> bool {
        self.storage.read().active.is_empty()
    }
}

impl IssueRegistry for IssueManager {
    fn add_issue(&self, issue: Issue) {
        let mut storage = self.storage.write();
        if storage.active.insert(issue) {
            storage.stats.total_raised += 1;
            storage.stats.last_change = Some(chrono::Utc::now());
            warn!(issue = %issue, "Issue raised");
        }
    }

    fn remove_issue(&self, issue: Issue) {
        let mut storage = self.storage.write();
        if storage.active.remove(&issue) {
            storage.stats.total_cleared += 1;
            storage.stats.last_change = Some(chrono::Utc::now());
            info!(issue = %issue, "Issue cleared");
        }
    }

    fn has_issue(&self, issue: Issue) -> bool {
        self.storage.read().active.contains(&issue)
    }

    fn issues(&self) -> Vec<Issue> {
        self.storage.read().active.iter().copied().collect()
    }
}
