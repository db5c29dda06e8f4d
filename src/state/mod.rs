//! State management module
//!
//! This module contains the timer lifecycle types, the per-timer
//! countdown state machine, and the registry that owns all timers.

pub(crate) mod countdown;
pub mod registry;
pub mod timer_state;

// Re-export main types
pub(crate) use countdown::CountdownTimer;
pub use registry::TimerRegistry;
pub use timer_state::{TimerSnapshot, TimerState};
