//! Error types for timer operations

use thiserror::Error;

/// Errors reported at the registry call boundary.
///
/// Operations keyed by timer id signal "no such timer" through their
/// return value (`false` or `None`) instead, since a missing id is an
/// expected outcome under concurrent UI interaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    /// Timer durations must be a positive number of seconds
    #[error("timer duration must be greater than 0 seconds")]
    InvalidDuration,
}
