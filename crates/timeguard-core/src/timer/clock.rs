//! Tick sources for driving countdowns.
//!
//! Countdowns never read the wall clock themselves. A [`Clock`] hands out
//! ticks; the controller turns each one into a `Tick` intent.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Source of 1 Hz ticks.
pub trait Clock {
    /// Block until the next tick is due. Returns `false` once the source is
    /// exhausted and no further ticks will be delivered.
    fn wait_tick(&mut self) -> bool;

    /// Timestamp for events produced by the tick just delivered.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall-clock tick source.
///
/// Missed intervals (system sleep, a slow consumer) are skipped rather than
/// delivered as a burst of catch-up ticks.
#[derive(Debug)]
pub struct SystemClock {
    period: Duration,
    next_due: Instant,
    /// Stop after this many ticks, if set.
    limit: Option<u64>,
    delivered: u64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            next_due: Instant::now() + period,
            limit: None,
            delivered: 0,
        }
    }

    /// Deliver at most `ticks` ticks.
    pub fn limited(mut self, ticks: u64) -> Self {
        self.limit = Some(ticks);
        self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn wait_tick(&mut self) -> bool {
        if self.limit.is_some_and(|limit| self.delivered >= limit) {
            return false;
        }
        let now = Instant::now();
        if self.next_due > now {
            std::thread::sleep(self.next_due - now);
            self.next_due += self.period;
        } else {
            // Late: deliver one tick now and realign instead of catching up.
            self.next_due = now + self.period;
        }
        self.delivered += 1;
        true
    }
}

/// Deterministic tick source for tests: yields a fixed number of ticks
/// without sleeping. Time starts at `epoch` and moves one second per tick.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: u64,
    delivered: u64,
    epoch: DateTime<Utc>,
}

impl ManualClock {
    pub fn new(ticks: u64) -> Self {
        Self {
            pending: ticks,
            delivered: 0,
            epoch: DateTime::default(),
        }
    }

    pub fn starting_at(mut self, epoch: DateTime<Utc>) -> Self {
        self.epoch = epoch;
        self
    }

    /// Queue more ticks.
    pub fn advance(&mut self, ticks: u64) {
        self.pending += ticks;
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    pub fn pending(&self) -> u64 {
        self.pending
    }
}

impl Clock for ManualClock {
    fn wait_tick(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        self.delivered += 1;
        true
    }

    fn now(&self) -> DateTime<Utc> {
        self.epoch + chrono::Duration::seconds(self.delivered as i64)
    }
}
