//! Shared utilities for stock-pulse
//!
//! Logging setup shared by the bot binary and by tests that want to see
//! tracing output.

pub mod logging;

pub use logging::{LogFormat, init_tracing, init_tracing_with};
