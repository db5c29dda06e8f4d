//! Per-timer tick task

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::state::CountdownTimer;

/// Drives one timer's countdown: the interval fires once immediately and
/// then once per elapsed second until the timer leaves the running state
/// or the task is aborted by a pause/stop.
///
/// Missed ticks are skipped rather than replayed in a burst; the
/// countdown is a wall-clock convenience, not a real-time scheduler.
pub(crate) async fn tick_loop(timer: Arc<CountdownTimer>) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut first = true;
    loop {
        interval.tick().await;
        if !timer.tick(first) {
            break;
        }
        first = false;
    }

    debug!("Tick cycle for timer {} ended", timer.id());
}
