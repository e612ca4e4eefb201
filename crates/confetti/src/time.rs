//! Frame timing and pacing.
//!
//! [`FramePacer`] pads each tick to the configured interval: it remembers
//! when the tick started and reports how much of the interval is left.
//! Ticks that overrun get no sleep and no catch-up. The wall clock sits
//! behind [`Clock`] so the driver can be ticked against a fake one.

use std::time::{Duration, Instant};

/// Monotonic time source plus a blocking delay.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// The real clock: [`Instant::now`] and [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Per-tick statistics, updated by the pacer.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    startup: Instant,
    /// Start of the current (or last) tick.
    tick_start: Instant,
    /// Work time of the last finished tick, excluding the pacing sleep.
    last_tick: Duration,
    elapsed: Duration,
    frame_count: u64,
}

impl Time {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            startup: now,
            tick_start: now,
            last_tick: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Work time of the last finished tick.
    pub fn last_tick(&self) -> Duration {
        self.last_tick
    }

    /// Time from the first tick's start to the current tick's start.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of ticks started so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    time: Time,
}

impl FramePacer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            time: Time::new(now),
        }
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Mark the start of a tick.
    pub fn begin(&mut self, now: Instant) {
        self.time.tick_start = now;
        self.time.elapsed = now.saturating_duration_since(self.time.startup);
        self.time.frame_count += 1;
    }

    /// Mark the end of a tick's work. Returns the time left in the
    /// interval, or `None` if the tick used all of it.
    pub fn finish(&mut self, now: Instant) -> Option<Duration> {
        let spent = now.saturating_duration_since(self.time.tick_start);
        self.time.last_tick = spent;
        self.interval.checked_sub(spent).filter(|d| !d.is_zero())
    }
}
