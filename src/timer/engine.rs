use std::time::{Duration, Instant};

use crate::notify::{CompletionNotifier, ThemeNotifier};
use crate::timer::mode::Mode;
use crate::timer::scheduler::{IntervalScheduler, Scheduler, TimerHandle};

/// Countdown cadence.
pub const TICK: Duration = Duration::from_secs(1);

/// Everything the screen needs to draw the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    /// Always within `0..=mode.total_secs()`.
    pub remaining_secs: u32,
    pub running: bool,
}

impl TimerState {
    /// Fresh, stopped state for `mode`.
    pub fn fresh(mode: Mode) -> Self {
        Self {
            mode,
            remaining_secs: mode.total_secs(),
            running: false,
        }
    }

    pub fn total_secs(&self) -> u32 {
        self.mode.total_secs()
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::fresh(Mode::Work)
    }
}

/// The Pomodoro timer: countdown state, its tick registration and the
/// collaborators it notifies.
///
/// At most one timer is ever registered with the scheduler. Any change to
/// `running` or `remaining_secs` cancels the current registration before a
/// new one is made, and dropping the timer cancels it for good.
pub struct PomodoroTimer<S: Scheduler = IntervalScheduler> {
    state: TimerState,
    scheduler: S,
    ticker: Option<TimerHandle>,
    notifier: CompletionNotifier,
    theme: Box<dyn ThemeNotifier>,
}

impl<S: Scheduler> PomodoroTimer<S> {
    /// Mount a timer in work mode, stopped at 25:00.
    pub fn new(
        scheduler: S,
        notifier: CompletionNotifier,
        theme: impl ThemeNotifier + 'static,
    ) -> Self {
        let mut timer = Self {
            state: TimerState::default(),
            scheduler,
            ticker: None,
            notifier,
            theme: Box::new(theme),
        };
        timer.theme.apply(&timer.state.mode.palette());
        timer
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Start or pause. Does nothing once the countdown has finished;
    /// `reset` first.
    pub fn toggle_running(&mut self) {
        if self.state.remaining_secs == 0 {
            tracing::debug!("toggle ignored, countdown already finished");
            return;
        }
        self.state.running = !self.state.running;
        tracing::info!(
            mode = self.state.mode.as_str(),
            remaining = self.state.remaining_secs,
            "{}",
            if self.state.running { "started" } else { "paused" }
        );
        self.reschedule();
    }

    /// Stop and rewind to the current mode's preset.
    pub fn reset(&mut self) {
        self.state = TimerState::fresh(self.state.mode);
        tracing::info!(mode = self.state.mode.as_str(), "reset");
        self.reschedule();
    }

    /// Change mode, stopping and rewinding to the new preset in one step.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.state = TimerState::fresh(mode);
        tracing::info!(mode = mode.as_str(), "switched mode");
        self.reschedule();
        self.theme.apply(&mode.palette());
    }

    /// Dispatch every tick the scheduler has due. Returns how many were
    /// applied to the countdown.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        for handle in self.scheduler.poll_due() {
            if self.tick(handle) {
                applied += 1;
            }
        }
        applied
    }

    /// When the next tick is due, if the countdown is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.and(self.scheduler.next_deadline())
    }

    fn tick(&mut self, handle: TimerHandle) -> bool {
        // A handle cancelled earlier in the same poll batch is stale.
        if self.ticker != Some(handle) {
            return false;
        }
        if !self.state.running || self.state.remaining_secs == 0 {
            return false;
        }

        self.state.remaining_secs -= 1;
        if self.state.remaining_secs == 0 {
            self.state.running = false;
            self.reschedule();
            tracing::info!(mode = self.state.mode.as_str(), "countdown finished");
            self.notifier.fire(self.state.mode);
        } else {
            self.reschedule();
        }
        true
    }

    fn reschedule(&mut self) {
        if let Some(handle) = self.ticker.take() {
            self.scheduler.cancel(handle);
        }
        if self.state.running && self.state.remaining_secs > 0 {
            self.ticker = Some(self.scheduler.schedule_repeating(TICK));
        }
    }
}

impl<S: Scheduler> Drop for PomodoroTimer<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            self.scheduler.cancel(handle);
        }
    }
}
