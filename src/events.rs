//! Event sink contract for timer notifications

use crate::state::TimerState;

/// Callback interface for timer events and updates.
///
/// Every method has a no-op default implementation, so consumers only
/// override the events they care about. For a single timer the callbacks
/// are delivered in the order the underlying transitions occurred.
///
/// Callbacks run on the tokio task driving the timer's tick cycle, and
/// are delivered while the emitting timer's internal lock is held; that
/// lock is what keeps the notifications for one timer in transition
/// order, and it is not reentrant. A callback must therefore not call
/// registry operations that target its own timer (for example
/// `get_remaining_time` from inside `on_tick` would self-deadlock) —
/// the current values arrive as arguments instead. Operations on other
/// timers are fine. A presentation layer that needs to touch
/// single-threaded UI state must marshal back to its own thread itself.
pub trait TimerEvents: Send + Sync {
    /// Called every second while the timer is running, including the
    /// initial tick at the full duration.
    fn on_tick(&self, _timer_id: u64, _remaining_seconds: u64, _total_seconds: u64) {}

    /// Called exactly once, when the countdown reaches zero.
    fn on_timer_completed(&self, _timer_id: u64, _name: &str) {}

    /// Called on every transition that changes the timer's state.
    fn on_state_changed(&self, _timer_id: u64, _old_state: TimerState, _new_state: TimerState) {}

    /// Called once when the timer enters the error state.
    fn on_timer_error(&self, _timer_id: u64, _error: &str) {}
}
