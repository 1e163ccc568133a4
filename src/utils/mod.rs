//! Utility modules for the checker
//!
//! - **error**: Error type and `Result` alias
//! - **logging**: Tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging setup

pub use error::{CheckerError, Result};
pub use logging::init_tracing;
