#[cfg(test)]
use std::cell::Cell;
#[cfg(test)]
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of "now" for the scheduler.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Cancel handle returned for every scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Scheduled-callback abstraction the countdown runs on.
///
/// The scheduler does not call back into its owner. Instead the owner polls
/// for due handles and dispatches them itself, which keeps every tick on the
/// owner's thread and strictly serialized with user input.
pub trait Scheduler {
    /// Register a timer that fires every `period`, first after one period.
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle;

    /// Drop a registration. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Handles whose deadline has passed, each at most once per call.
    fn poll_due(&mut self) -> Vec<TimerHandle>;

    /// Earliest pending deadline, if any timer is live.
    fn next_deadline(&self) -> Option<Instant>;

    /// Number of live registrations.
    fn live_count(&self) -> usize;
}

#[derive(Debug)]
struct Entry {
    handle: TimerHandle,
    period: Duration,
    deadline: Instant,
}

/// Deadline-based scheduler over an injectable clock.
#[derive(Debug)]
pub struct IntervalScheduler<C: Clock = SystemClock> {
    clock: C,
    next_id: u64,
    entries: Vec<Entry>,
}

impl IntervalScheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for IntervalScheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> IntervalScheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<C: Clock> Scheduler for IntervalScheduler<C> {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            period,
            deadline: self.clock.now() + period,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    fn poll_due(&mut self) -> Vec<TimerHandle> {
        let now = self.clock.now();
        let mut due = Vec::new();
        for entry in &mut self.entries {
            if entry.deadline <= now {
                due.push(entry.handle);
                entry.deadline += entry.period;
            }
        }
        due
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    fn live_count(&self) -> usize {
        self.entries.len()
    }
}

/// Lets a test keep a handle on a scheduler the timer owns.
#[cfg(test)]
impl<T: Scheduler> Scheduler for Rc<std::cell::RefCell<T>> {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        self.borrow_mut().schedule_repeating(period)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.borrow_mut().cancel(handle)
    }

    fn poll_due(&mut self) -> Vec<TimerHandle> {
        self.borrow_mut().poll_due()
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.borrow().next_deadline()
    }

    fn live_count(&self) -> usize {
        self.borrow().live_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn fires_after_one_period() {
        let clock = ManualClock::new();
        let mut sched = IntervalScheduler::with_clock(clock.clone());
        let h = sched.schedule_repeating(SEC);

        clock.advance(Duration::from_millis(999));
        assert!(sched.poll_due().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(sched.poll_due(), vec![h]);
        // Already advanced to the next period
        assert!(sched.poll_due().is_empty());
    }

    #[test]
    fn repeats_every_period() {
        let clock = ManualClock::new();
        let mut sched = IntervalScheduler::with_clock(clock.clone());
        let h = sched.schedule_repeating(SEC);
        for _ in 0..3 {
            clock.advance(SEC);
            assert_eq!(sched.poll_due(), vec![h]);
        }
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let clock = ManualClock::new();
        let mut sched = IntervalScheduler::with_clock(clock.clone());
        let h = sched.schedule_repeating(SEC);
        sched.cancel(h);
        clock.advance(SEC * 5);
        assert!(sched.poll_due().is_empty());
        assert_eq!(sched.live_count(), 0);
        assert_eq!(sched.next_deadline(), None);
        // Second cancel is harmless
        sched.cancel(h);
    }

    #[test]
    fn handles_are_unique() {
        let mut sched = IntervalScheduler::with_clock(ManualClock::new());
        let a = sched.schedule_repeating(SEC);
        let b = sched.schedule_repeating(SEC);
        assert_ne!(a, b);
        assert_eq!(sched.live_count(), 2);
    }

    #[test]
    fn next_deadline_is_earliest() {
        let clock = ManualClock::new();
        let start = clock.now();
        let mut sched = IntervalScheduler::with_clock(clock.clone());
        sched.schedule_repeating(SEC * 3);
        sched.schedule_repeating(SEC);
        assert_eq!(sched.next_deadline(), Some(start + SEC));
    }
}
