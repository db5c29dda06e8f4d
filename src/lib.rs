//! Cooking Timer - concurrent countdown timers for recipe applications
//!
//! This library tracks an arbitrary number of independently running,
//! pausable countdown timers. A [`TimerRegistry`] owns every timer,
//! allocates unique ids, and routes start/stop/pause/resume and query
//! requests; each running timer drives its own per-second tick cycle and
//! reports progress through a caller-supplied [`TimerEvents`] sink.

pub mod error;
pub mod events;
pub mod state;
pub(crate) mod tasks;
pub mod utils;

// Re-export commonly used types
pub use error::TimerError;
pub use events::TimerEvents;
pub use state::{TimerRegistry, TimerSnapshot, TimerState};
pub use utils::format_time;
