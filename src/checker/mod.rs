//! Clock synchronization checker
//!
//! [`NtpSynchronizationChecker`] runs one [`SyncProbe`] at a time against a
//! remote time source, reports the outcome to an [`IssueRegistry`] as
//! [`Issue::TimeNotSynchronized`], and re-arms itself for the next check.
//!
//! All state transitions happen on a single event loop (see [`spawn`]); timers
//! and probes only deliver [`CheckerEvent`]s to it.
//!
//! [`IssueRegistry`]: crate::issues::IssueRegistry
//! [`Issue::TimeNotSynchronized`]: crate::issues::Issue::TimeNotSynchronized

mod checker;
mod driver;
mod probe;
mod types;


// Re-export public types
pub use checker::NtpSynchronizationChecker;
pub use driver::{CheckerHandle, spawn};
pub use probe::{ClockSource, ProbeVerdict, SyncProbe};
pub use types::{CheckerEvent, CheckerEvents, CheckerState, CheckerStatus};
