//! Utility functions module

pub mod format;

// Re-export main functions
pub use format::format_time;
