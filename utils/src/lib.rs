//! Shared utilities for facegate.

pub mod time;

pub use time::format_elapsed;
