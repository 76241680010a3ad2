//! Repeating fixed-period tick
//!
//! [`Interval`] fires a task once per period until the task asks to stop or
//! the interval is cancelled. The clock is pluggable: [`ThreadClock`] sleeps
//! in real time, [`ManualClock`] only advances a virtual counter.

use std::time::{Duration, Instant};

/// What the scheduled task wants after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

/// Time source for an [`Interval`]
pub trait Clock {
    /// Time since the clock started
    fn now(&self) -> Duration;
    /// Block until `deadline` (no-op if already past)
    fn sleep_until(&mut self, deadline: Duration);
}

/// Wall-clock time, sleeping the current thread
#[derive(Debug, Clone, Copy)]
pub struct ThreadClock {
    start: Instant,
}

impl ThreadClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for ThreadClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ThreadClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep_until(&mut self, deadline: Duration) {
        if let Some(wait) = deadline.checked_sub(self.now()) {
            std::thread::sleep(wait);
        }
    }
}

/// Virtual time that jumps straight to each deadline
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep_until(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

/// Cancellable repeating task with a fixed period
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    cancelled: bool,
    fired: u64,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            cancelled: false,
            fired: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Ticks fired so far
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Fire `task` every period until it returns [`TickFlow::Stop`]
    ///
    /// Returns the number of ticks fired by this call.
    pub fn run<C, T, F>(&mut self, clock: &mut C, ctx: &mut T, task: F) -> u64
    where
        C: Clock,
        F: FnMut(&mut T) -> TickFlow,
    {
        self.run_for(u64::MAX, clock, ctx, task)
    }

    /// Like [`Interval::run`], but fires at most `max_ticks` times
    ///
    /// Deadlines are measured from the first call, so a slow tick does not
    /// push every later tick back.
    pub fn run_for<C, T, F>(
        &mut self,
        max_ticks: u64,
        clock: &mut C,
        ctx: &mut T,
        mut task: F,
    ) -> u64
    where
        C: Clock,
        F: FnMut(&mut T) -> TickFlow,
    {
        let start = clock.now();
        let mut fired = 0u64;

        while !self.cancelled && fired < max_ticks {
            let periods = u32::try_from(fired + 1).unwrap_or(u32::MAX);
            let deadline = start + self.period.saturating_mul(periods);
            clock.sleep_until(deadline);

            fired += 1;
            self.fired += 1;
            if task(ctx) == TickFlow::Stop {
                self.cancel();
            }
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_cancels() {
        let mut interval = Interval::new(Duration::from_millis(30));
        let mut clock = ManualClock::new();
        let mut count = 0;

        let fired = interval.run(&mut clock, &mut count, |count| {
            *count += 1;
            if *count == 5 {
                TickFlow::Stop
            } else {
                TickFlow::Continue
            }
        });

        assert_eq!(fired, 5);
        assert_eq!(count, 5);
        assert!(interval.is_cancelled());
        assert_eq!(clock.now(), Duration::from_millis(150));
    }

    #[test]
    fn test_run_for_bounds_ticks() {
        let mut interval = Interval::new(Duration::from_millis(10));
        let mut clock = ManualClock::new();
        let mut count = 0u32;

        let fired = interval.run_for(7, &mut clock, &mut count, |count| {
            *count += 1;
            TickFlow::Continue
        });

        assert_eq!(fired, 7);
        assert_eq!(interval.fired(), 7);
        assert!(!interval.is_cancelled());
        assert_eq!(clock.now(), Duration::from_millis(70));
    }

    #[test]
    fn test_cancelled_interval_never_fires() {
        let mut interval = Interval::new(Duration::from_millis(10));
        interval.cancel();
        let mut clock = ManualClock::new();
        let mut count = 0u32;

        let fired = interval.run(&mut clock, &mut count, |count| {
            *count += 1;
            TickFlow::Continue
        });
        assert_eq!(fired, 0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let mut clock = ManualClock::new();
        clock.advance(Duration::from_millis(100));
        clock.sleep_until(Duration::from_millis(50));
        assert_eq!(clock.now(), Duration::from_millis(100));
    }

    #[test]
    fn test_thread_clock_sleeps() {
        let mut interval = Interval::new(Duration::from_millis(2));
        let mut clock = ThreadClock::new();
        let mut ticks = 0u32;
        interval.run_for(3, &mut clock, &mut ticks, |ticks| {
            *ticks += 1;
            TickFlow::Continue
        });
        assert!(clock.now() >= Duration::from_millis(6));
    }
}
