//! Integration tests for ntp-checker
//!
//! These tests run the checker on its own event loop and observe it only
//! through its handle and the shared issue registry.

pub mod checker_lifecycle_tests;
pub mod config_loading_tests;
