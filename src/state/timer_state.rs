//! Timer lifecycle states and read-only snapshots

use serde::{Deserialize, Serialize};

/// The lifecycle states of a countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Timer is currently counting down
    Running,
    /// Timer is paused and can be resumed
    Paused,
    /// Timer has been manually stopped, or has not been started yet
    Stopped,
    /// Timer has completed its countdown
    Completed,
    /// Timer encountered an error during a tick
    Error,
}

impl TimerState {
    /// Terminal states accept no further start/pause/resume transitions;
    /// timers in them remain queryable and removable.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TimerState::Completed | TimerState::Error)
    }
}

/// Point-in-time copy of a timer's observable fields, as returned by
/// [`TimerRegistry::get_all_timers`](crate::TimerRegistry::get_all_timers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub id: u64,
    pub name: String,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub state: TimerState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_and_error_are_terminal() {
        assert!(TimerState::Completed.is_terminal());
        assert!(TimerState::Error.is_terminal());
        assert!(!TimerState::Running.is_terminal());
        assert!(!TimerState::Paused.is_terminal());
        assert!(!TimerState::Stopped.is_terminal());
    }

    #[test]
    fn snapshot_serializes_state_as_snake_case() {
        let snapshot = TimerSnapshot {
            id: 3,
            name: "Green Tea".to_string(),
            total_seconds: 120,
            remaining_seconds: 45,
            state: TimerState::Running,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "running");
        assert_eq!(json["remaining_seconds"], 45);
        assert_eq!(json["name"], "Green Tea");
    }
}
