//! Issue registry trait

use super::types::Issue;

/// A shared set of fault flags.
///
/// Both mutations are idempotent: adding a present issue or removing an
/// absent one changes nothing. Implementations own their own locking so that
/// writers of different issues can interleave freely.
pub trait IssueRegistry: Send + Sync {
    /// Raise `issue`
    fn add_issue(&self, issue: Issue);

    /// Clear `issue`
    fn remove_issue(&self, issue: Issue);

    /// Whether `issue` is currently raised
    fn has_issue(&self, issue: Issue) -> bool;

    /// All currently raised issues, in a stable order
    fn issues(&self) -> Vec<Issue>;
}
