//! Background tasks module
//!
//! This module contains the per-timer tick task that drives running
//! countdowns.

pub(crate) mod tick;

// Re-export main functions
pub(crate) use tick::tick_loop;
