//! Issue registry
//!
//! Process-wide fault flags. Components raise an [`Issue`] when they detect a
//! problem and clear it once the problem is resolved.

mod manager;
mod registry;
mod types;


// Re-export public types
pub use manager::IssueManager;
pub use registry::IssueRegistry;
pub use types::{Issue, IssueStats};
