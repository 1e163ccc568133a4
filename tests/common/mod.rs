//! Common test utilities for ntp-checker
//!
//! - Scripted and gated clock sources
//! - Checker fixtures wired to an in-memory issue registry

pub mod clocks;

// Re-export commonly used items
pub use clocks::{GatedClock, Reading, ScriptedClock};
pub use fixtures::{CheckerFixture, fast_retry_config, init_test_logging};
