//! Registry that owns every active timer and routes requests by id

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::error::TimerError;
use crate::events::TimerEvents;
use crate::state::{CountdownTimer, TimerSnapshot, TimerState};

/// Durations above this (24 hours) are accepted but logged as suspicious.
const LONG_DURATION_WARN_SECS: u64 = 86_400;

/// Owns the set of all active countdown timers.
///
/// The registry allocates unique timer ids, tracks which timer is the
/// "default" for callers that omit an explicit id, and routes
/// start/stop/pause/resume and query requests to the right timer.
/// Construct one registry at application start and share it behind an
/// [`Arc`]; every operation takes `&self` and is safe to call
/// concurrently. Operations on different ids never interfere, and
/// operations on the same id serialize on that timer's own lock.
pub struct TimerRegistry {
    timers: Mutex<HashMap<u64, Arc<CountdownTimer>>>,
    next_id: AtomicU64,
    default_timer_id: Mutex<Option<u64>>,
}

impl TimerRegistry {
    /// Creates an empty registry. Ids start at 1 and are never reused
    /// within the process lifetime.
    pub fn new() -> Self {
        Self {
            timers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            default_timer_id: Mutex::new(None),
        }
    }

    /// Creates a new timer and starts it immediately, returning its id.
    ///
    /// The first timer created while no default exists becomes the
    /// default timer. Durations longer than 24 hours are accepted with a
    /// warning. Must be called from within a tokio runtime, since the
    /// tick cycle runs as a spawned task.
    pub fn start_timer(
        &self,
        seconds: u64,
        name: Option<&str>,
        events: Option<Arc<dyn TimerEvents>>,
    ) -> Result<u64, TimerError> {
        if seconds == 0 {
            return Err(TimerError::InvalidDuration);
        }
        if seconds > LONG_DURATION_WARN_SECS {
            warn!("Timer duration is very long: {} seconds", seconds);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let timer = Arc::new(CountdownTimer::new(
            id,
            name.map(str::to_string),
            seconds,
            events,
        ));
        self.lock_timers().insert(id, Arc::clone(&timer));

        // Claim the default slot atomically so two concurrent first
        // starts cannot both install themselves.
        {
            let mut default_id = self.lock_default();
            if default_id.is_none() {
                *default_id = Some(id);
            }
        }

        timer.start();
        info!("Started timer {} for {} seconds", id, seconds);
        Ok(id)
    }

    /// Stops a timer and removes it from the registry. With no id, the
    /// default timer is targeted. Returns `false` when no matching timer
    /// exists.
    ///
    /// If the removed timer was the default, the lowest remaining id
    /// becomes the new default, or the default is cleared when no timers
    /// remain.
    pub fn stop_timer(&self, timer_id: Option<u64>) -> bool {
        let Some(id) = self.resolve_id(timer_id) else {
            warn!("No default timer to stop");
            return false;
        };
        let Some(timer) = self.find(id) else {
            warn!("Timer with id {} not found", id);
            return false;
        };

        timer.stop();
        self.lock_timers().remove(&id);

        // Reassign under the default lock, consulting the map inside the
        // same critical section. A replacement chosen before this lock is
        // taken could itself be stopped in the gap, leaving the default
        // pointing at a removed id.
        let mut default_id = self.lock_default();
        if *default_id == Some(id) {
            *default_id = self.lock_timers().keys().min().copied();
        }
        true
    }

    /// Pauses a running timer, preserving its remaining time. Returns
    /// `false` when the timer is absent or not currently running.
    pub fn pause_timer(&self, timer_id: Option<u64>) -> bool {
        let Some(id) = self.resolve_id(timer_id) else {
            warn!("No default timer to pause");
            return false;
        };
        let Some(timer) = self.find(id) else {
            warn!("Timer with id {} not found", id);
            return false;
        };
        timer.pause()
    }

    /// Resumes a paused timer, continuing from its remaining time.
    /// Returns `false` when the timer is absent or not currently paused.
    pub fn resume_timer(&self, timer_id: Option<u64>) -> bool {
        let Some(id) = self.resolve_id(timer_id) else {
            warn!("No default timer to resume");
            return false;
        };
        let Some(timer) = self.find(id) else {
            warn!("Timer with id {} not found", id);
            return false;
        };
        if !timer.is_paused() {
            warn!("Timer {} is not paused, cannot resume", id);
            return false;
        }

        // start() handles resuming a paused timer.
        timer.start();
        true
    }

    /// Remaining seconds for a timer, or `None` when no matching timer
    /// exists.
    pub fn get_remaining_time(&self, timer_id: Option<u64>) -> Option<u64> {
        let id = self.resolve_id(timer_id)?;
        Some(self.find(id)?.remaining_seconds())
    }

    /// Whether the timer is currently running. `false` when absent.
    pub fn is_running(&self, timer_id: Option<u64>) -> bool {
        self.resolve_id(timer_id)
            .and_then(|id| self.find(id))
            .map_or(false, |timer| timer.is_running())
    }

    /// Current state of a specific timer, or `None` when not registered.
    pub fn get_timer_state(&self, timer_id: u64) -> Option<TimerState> {
        Some(self.find(timer_id)?.state())
    }

    /// Point-in-time snapshots of every registered timer. Order is not
    /// guaranteed.
    pub fn get_all_timers(&self) -> Vec<TimerSnapshot> {
        // Collect the handles first so no per-timer lock is taken while
        // the map lock is held; a tick task holding its timer's lock may
        // be calling back into the registry at the same time.
        let timers: Vec<Arc<CountdownTimer>> = self.lock_timers().values().cloned().collect();
        timers.iter().map(|timer| timer.snapshot()).collect()
    }

    /// Number of currently registered timers.
    pub fn get_active_timer_count(&self) -> usize {
        self.lock_timers().len()
    }

    /// Stops and removes every registered timer and clears the default.
    /// Returns the number of timers stopped.
    pub fn stop_all_timers(&self) -> usize {
        let ids: Vec<u64> = self.lock_timers().keys().copied().collect();

        let mut stopped = 0;
        for id in ids {
            if self.stop_timer(Some(id)) {
                stopped += 1;
            }
        }

        *self.lock_default() = None;
        info!("Stopped {} timers", stopped);
        stopped
    }

    fn resolve_id(&self, timer_id: Option<u64>) -> Option<u64> {
        timer_id.or_else(|| *self.lock_default())
    }

    fn find(&self, id: u64) -> Option<Arc<CountdownTimer>> {
        self.lock_timers().get(&id).cloned()
    }

    fn lock_timers(&self) -> MutexGuard<'_, HashMap<u64, Arc<CountdownTimer>>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Lock order: the default lock may be taken first and the timers
    // lock inside it (stop_timer's reassignment); no path acquires them
    // in the reverse order.
    fn lock_default(&self) -> MutexGuard<'_, Option<u64>> {
        self.default_timer_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
