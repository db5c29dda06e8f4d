//! A single countdown timer with its own state machine and tick cycle

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::events::TimerEvents;
use crate::state::{TimerSnapshot, TimerState};
use crate::tasks::tick_loop;

/// Mutable timer fields, guarded by the per-timer lock.
#[derive(Debug)]
struct Inner {
    remaining_seconds: u64,
    state: TimerState,
    /// Handle of the spawned tick task for the current run. Present
    /// exactly while the timer is in the running state.
    tick_task: Option<JoinHandle<()>>,
}

/// A single cooking timer.
///
/// Instances are created and exclusively owned by the
/// [`TimerRegistry`](crate::state::TimerRegistry); nothing outside the
/// crate holds one past its removal from the registry. All mutation goes
/// through the per-timer lock, so a pause request and an in-flight tick
/// cannot race into an inconsistent state/remaining pair. Different
/// timers never contend with each other's locks.
pub(crate) struct CountdownTimer {
    id: u64,
    name: String,
    total_seconds: u64,
    events: Option<Arc<dyn TimerEvents>>,
    inner: Mutex<Inner>,
}

impl CountdownTimer {
    /// Creates a new timer in the stopped state. `name` defaults to
    /// `"Timer <id>"` when not supplied.
    pub(crate) fn new(
        id: u64,
        name: Option<String>,
        total_seconds: u64,
        events: Option<Arc<dyn TimerEvents>>,
    ) -> Self {
        Self {
            id,
            name: name.unwrap_or_else(|| format!("Timer {}", id)),
            total_seconds,
            events,
            inner: Mutex::new(Inner {
                remaining_seconds: total_seconds,
                state: TimerState::Stopped,
                tick_task: None,
            }),
        }
    }

    /// Starts or resumes the timer, spawning a fresh tick cycle. The
    /// remaining time is left untouched, so a paused timer continues
    /// where it left off. No-op (with a warning) for running, completed,
    /// and errored timers.
    pub(crate) fn start(self: Arc<Self>) {
        let mut inner = self.lock_inner();
        match inner.state {
            TimerState::Running => {
                warn!("Timer {} is already running", self.id);
                return;
            }
            TimerState::Completed => {
                warn!("Timer {} has already completed", self.id);
                return;
            }
            TimerState::Error => {
                warn!("Timer {} is in the error state and cannot be started", self.id);
                return;
            }
            TimerState::Stopped | TimerState::Paused => {}
        }

        let old_state = inner.state;
        inner.state = TimerState::Running;
        inner.tick_task = Some(tokio::spawn(tick_loop(Arc::clone(&self))));

        self.notify_state_changed(old_state, TimerState::Running);
        info!(
            "Timer {} started with {} seconds remaining",
            self.id, inner.remaining_seconds
        );
    }

    /// Pauses a running timer, preserving the remaining time. Returns
    /// `false` (with a warning) when the timer is not running.
    pub(crate) fn pause(&self) -> bool {
        let mut inner = self.lock_inner();
        if inner.state != TimerState::Running {
            warn!("Timer {} is not running, cannot pause", self.id);
            return false;
        }

        inner.state = TimerState::Paused;
        Self::cancel_tick_task(&mut inner);

        self.notify_state_changed(TimerState::Running, TimerState::Paused);
        info!(
            "Timer {} paused with {} seconds remaining",
            self.id, inner.remaining_seconds
        );
        true
    }

    /// Stops the timer, cancelling any tick cycle and resetting the
    /// remaining time to the full duration. No-op when already stopped
    /// or completed.
    pub(crate) fn stop(&self) {
        let mut inner = self.lock_inner();
        if matches!(inner.state, TimerState::Stopped | TimerState::Completed) {
            return;
        }

        let old_state = inner.state;
        inner.state = TimerState::Stopped;
        Self::cancel_tick_task(&mut inner);
        inner.remaining_seconds = self.total_seconds;

        self.notify_state_changed(old_state, TimerState::Stopped);
        info!("Timer {} stopped", self.id);
    }

    /// Evaluates one firing of the tick cycle. Returns `false` when the
    /// cycle must end: a pause/stop raced in before the lock was taken,
    /// the countdown completed, or the event sink failed.
    ///
    /// The decrement happens on entry for every firing except the first
    /// of a run, so between firings the stored remaining time always
    /// equals the value most recently reported through `on_tick`.
    pub(crate) fn tick(&self, first: bool) -> bool {
        let mut inner = self.lock_inner();
        if inner.state != TimerState::Running {
            return false;
        }

        if !first {
            inner.remaining_seconds = inner.remaining_seconds.saturating_sub(1);
        }
        let remaining = inner.remaining_seconds;

        if let Err(message) =
            self.emit(|events| events.on_tick(self.id, remaining, self.total_seconds))
        {
            self.fail(&mut inner, &message);
            return false;
        }

        if remaining == 0 {
            self.complete(&mut inner);
            return false;
        }
        true
    }

    /// Transitions a running timer to completed. Fired from the tick
    /// evaluation when the countdown reaches zero; the completion
    /// notification is delivered exactly once.
    fn complete(&self, inner: &mut Inner) {
        let old_state = inner.state;
        inner.state = TimerState::Completed;
        Self::cancel_tick_task(inner);

        if let Err(message) = self.emit(|events| events.on_timer_completed(self.id, &self.name)) {
            warn!("Timer {} completion callback failed: {}", self.id, message);
        }
        self.notify_state_changed(old_state, TimerState::Completed);
        info!("Timer {} completed: {}", self.id, self.name);
    }

    /// Transitions the timer to the error state after a tick fault,
    /// cancelling the cycle. The error notification precedes the state
    /// change notification.
    fn fail(&self, inner: &mut Inner, message: &str) {
        let old_state = inner.state;
        inner.state = TimerState::Error;
        Self::cancel_tick_task(inner);

        if let Err(nested) = self.emit(|events| events.on_timer_error(self.id, message)) {
            warn!("Timer {} error callback failed: {}", self.id, nested);
        }
        self.notify_state_changed(old_state, TimerState::Error);
        error!("Timer {} error: {}", self.id, message);
    }

    fn notify_state_changed(&self, old_state: TimerState, new_state: TimerState) {
        if let Err(message) =
            self.emit(|events| events.on_state_changed(self.id, old_state, new_state))
        {
            warn!("Timer {} state change callback failed: {}", self.id, message);
        }
    }

    /// Invokes the event sink, translating a panicking callback into an
    /// error message instead of letting it unwind through the tick task.
    fn emit<F>(&self, invoke: F) -> Result<(), String>
    where
        F: FnOnce(&dyn TimerEvents),
    {
        let Some(events) = self.events.as_deref() else {
            return Ok(());
        };

        catch_unwind(AssertUnwindSafe(|| invoke(events))).map_err(|panic| {
            if let Some(message) = panic.downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Some(message) = panic.downcast_ref::<String>() {
                message.clone()
            } else {
                "timer callback panicked".to_string()
            }
        })
    }

    /// Cancels the pending tick schedule. A tick already mid-flight when
    /// the task is aborted may still reach the lock once; it observes
    /// the new state there and becomes a no-op.
    fn cancel_tick_task(inner: &mut Inner) {
        if let Some(task) = inner.tick_task.take() {
            task.abort();
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn remaining_seconds(&self) -> u64 {
        self.lock_inner().remaining_seconds
    }

    pub(crate) fn state(&self) -> TimerState {
        self.lock_inner().state
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state() == TimerState::Running
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.state() == TimerState::Paused
    }

    /// Read-only copy of the observable fields at this instant.
    pub(crate) fn snapshot(&self) -> TimerSnapshot {
        let inner = self.lock_inner();
        TimerSnapshot {
            id: self.id,
            name: self.name.clone(),
            total_seconds: self.total_seconds,
            remaining_seconds: inner.remaining_seconds,
            state: inner.state,
        }
    }

    /// The per-timer lock. Sink panics never unwind past `emit`, so a
    /// poisoned lock can only come from a fault in our own tick logic;
    /// recover the guard rather than propagating the poison.
    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
