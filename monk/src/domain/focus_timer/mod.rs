//! Cancellable one-second focus timer.
//!
//! The timer owns at most one scheduled task. Each tick decrements a
//! [`Countdown`]; when it reaches zero a [`FocusSessionCompleted`] event is
//! published, the completed-session counter increases, and the timer returns
//! to idle with its full length restored.
//!
//! Stopping (pause, reset, activity or length changes, drop) aborts the task
//! and bumps a run generation, so a tick already in flight for an earlier run
//! can never touch the countdown.

mod activity;
mod countdown;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

pub use activity::{
    Activity, DURATION_PRESETS, DurationOutOfRange, FOCUS_MINUTES_MAX, FOCUS_MINUTES_MIN,
    FocusDuration, UnknownActivity,
};
pub use countdown::{Countdown, Tick};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Published when a session runs to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusSessionCompleted {
    pub activity: Activity,
    pub minutes: u32,
}

/// Whether the countdown is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Point-in-time view of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerStatus {
    pub state: TimerState,
    pub activity: Activity,
    pub duration: FocusDuration,
    pub countdown: Countdown,
    pub completed_sessions: u32,
}

#[derive(Debug)]
struct TimerInner {
    state: TimerState,
    activity: Activity,
    duration: FocusDuration,
    countdown: Countdown,
    completed_sessions: u32,
    generation: u64,
}

impl TimerInner {
    fn load(&mut self, duration: FocusDuration) {
        self.duration = duration;
        self.countdown = Countdown::new(duration.seconds());
    }

    fn tick(&mut self, generation: u64) -> TickOutcome {
        if self.state != TimerState::Running || self.generation != generation {
            return TickOutcome::Stale;
        }
        match self.countdown.tick() {
            Tick::Running { .. } => TickOutcome::Continue,
            Tick::Finished => {
                self.state = TimerState::Idle;
                self.completed_sessions = self.completed_sessions.saturating_add(1);
                TickOutcome::Completed(FocusSessionCompleted {
                    activity: self.activity,
                    minutes: self.duration.minutes(),
                })
            }
        }
    }
}

enum TickOutcome {
    Continue,
    Stale,
    Completed(FocusSessionCompleted),
}

/// Receiving side for completed sessions.
#[derive(Debug)]
pub struct FocusEvents {
    receiver: mpsc::UnboundedReceiver<FocusSessionCompleted>,
}

impl FocusEvents {
    /// Wait for the next completed session.
    ///
    /// Returns `None` once the timer has been dropped and all events drained.
    pub async fn next(&mut self) -> Option<FocusSessionCompleted> {
        self.receiver.recv().await
    }

    /// Take a completed session if one is already queued.
    pub fn try_next(&mut self) -> Option<FocusSessionCompleted> {
        self.receiver.try_recv().ok()
    }
}

/// Focus timer driving a single scheduled tick task.
///
/// [`FocusTimer::start`] must be called from within a Tokio runtime.
#[derive(Debug)]
pub struct FocusTimer {
    inner: Arc<Mutex<TimerInner>>,
    events: mpsc::UnboundedSender<FocusSessionCompleted>,
    task: Option<JoinHandle<()>>,
}

impl FocusTimer {
    /// Create an idle timer loaded with `activity`'s default length.
    pub fn new(activity: Activity) -> (Self, FocusEvents) {
        let duration = activity.default_duration();
        let (sender, receiver) = mpsc::unbounded_channel();
        let inner = TimerInner {
            state: TimerState::Idle,
            activity,
            duration,
            countdown: Countdown::new(duration.seconds()),
            completed_sessions: 0,
            generation: 0,
        };
        let timer = Self {
            inner: Arc::new(Mutex::new(inner)),
            events: sender,
            task: None,
        };
        (timer, FocusEvents { receiver })
    }

    /// Current state, activity, and remaining time.
    pub fn status(&self) -> TimerStatus {
        let inner = self.lock();
        TimerStatus {
            state: inner.state,
            activity: inner.activity,
            duration: inner.duration,
            countdown: inner.countdown,
            completed_sessions: inner.completed_sessions,
        }
    }

    /// Start or resume counting down. Does nothing if already running.
    pub fn start(&mut self) {
        let generation = {
            let mut inner = self.lock();
            if inner.state == TimerState::Running {
                return;
            }
            inner.state = TimerState::Running;
            inner.generation = inner.generation.wrapping_add(1);
            debug!(
                activity = %inner.activity,
                remaining = %inner.countdown,
                "focus timer started"
            );
            inner.generation
        };

        if let Some(stale) = self.task.take() {
            stale.abort();
        }
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        self.task = Some(tokio::spawn(run_ticks(inner, events, generation)));
    }

    /// Stop counting down, keeping the remaining time.
    pub fn pause(&mut self) {
        let mut inner = self.lock();
        if inner.state != TimerState::Running {
            return;
        }
        inner.state = TimerState::Paused;
        debug!(remaining = %inner.countdown, "focus timer paused");
        drop(inner);
        self.cancel_task();
    }

    /// Stop and restore the full length.
    pub fn reset(&mut self) {
        self.stop_with(|inner| inner.countdown.reset());
    }

    /// Stop and load `activity` with its default length.
    pub fn select_activity(&mut self, activity: Activity) {
        self.stop_with(|inner| {
            inner.activity = activity;
            inner.load(activity.default_duration());
        });
    }

    /// Stop and load a custom length for the current activity.
    pub fn set_duration(&mut self, duration: FocusDuration) {
        self.stop_with(|inner| inner.load(duration));
    }

    fn stop_with(&mut self, change: impl FnOnce(&mut TimerInner)) {
        let mut inner = self.lock();
        inner.state = TimerState::Idle;
        inner.generation = inner.generation.wrapping_add(1);
        change(&mut inner);
        drop(inner);
        self.cancel_task();
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, TimerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

async fn run_ticks(
    inner: Arc<Mutex<TimerInner>>,
    events: mpsc::UnboundedSender<FocusSessionCompleted>,
    generation: u64,
) {
    let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    loop {
        ticker.tick().await;
        let outcome = inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .tick(generation);
        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::Stale => return,
            TickOutcome::Completed(event) => {
                info!(
                    activity = %event.activity,
                    minutes = event.minutes,
                    "focus session completed"
                );
                if events.send(event).is_err() {
                    debug!("focus events receiver dropped");
                }
                return;
            }
        }
    }
}
