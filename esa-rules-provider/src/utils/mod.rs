//! Utility modules.

/// Log sanitization so response bodies never flood the logs.
pub mod log_sanitizer;
