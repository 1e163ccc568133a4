//! # ntp-checker
//!
//! A self-rescheduling clock synchronization checker.
//!
//! Once started, the checker launches a single probe against a remote time
//! source, turns the probe's verdict into the `TimeNotSynchronized` issue on a
//! shared [`IssueRegistry`], and then arms a timer for the next check. The
//! cycle repeats until the checker is shut down.
//!
//! ## Features
//!
//! - **Single-flight**: at most one probe in flight, never a probe and a timer at once
//! - **Retrying probes**: failed probes are retried by the work framework with backoff
//! - **Safe teardown**: late timer expiries and probe results become no-ops
//! - **Injected registry**: any [`IssueRegistry`] implementation can receive the fault signal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use ntp_checker::{ClockSource, Config, IssueManager, NtpSynchronizationChecker};
//!
//! struct MyClock;
//!
//! #[async_trait]
//! impl ClockSource for MyClock {
//!     async fn clock_offset(&self, _server: &str) -> ntp_checker::Result<chrono::TimeDelta> {
//!         Ok(chrono::TimeDelta::milliseconds(12))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/checker.yaml").await?;
//!     let issues = Arc::new(IssueManager::new());
//!
//!     let (checker, events) =
//!         NtpSynchronizationChecker::new(config.checker(), Arc::new(MyClock), issues.clone());
//!     let handle = ntp_checker::spawn(checker, events);
//!     handle.start();
//!
//!     tokio::signal::ctrl_c().await?;
//!     handle.shutdown();
//!     handle.join().await;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod checker;
pub mod config;
pub mod issues;
pub mod timer;
pub mod utils;
pub mod work;

// Re-export main types
pub use checker::{
    CheckerEvent, CheckerEvents, CheckerHandle, CheckerState, CheckerStatus, ClockSource,
    NtpSynchronizationChecker, ProbeVerdict, SyncProbe, spawn,
};
pub use config::Config;
pub use issues::{Issue, IssueManager, IssueRegistry};
pub use utils::error::{CheckerError, Result};
