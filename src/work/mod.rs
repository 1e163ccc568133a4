//! Parent/child work composition
//!
//! A [`WorkParent`] owns a small registry of child [`Work`] items keyed by
//! [`WorkId`]. Children run as tokio tasks under a [`RetryPolicy`] and report
//! every state change back to the parent as a [`WorkEvent`]. The parent only
//! records those changes; deciding what to do with them is left to the owner,
//! which typically polls [`WorkParent::all_children_successful`].

mod parent;
mod runner;
mod types;


// Re-export public types
pub use parent::WorkParent;
pub use runner::RetryPolicy;
pub use types::{Work, WorkEvent, WorkId, WorkState, WorkUpdate};
