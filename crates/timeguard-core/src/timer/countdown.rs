//! Countdown engine implementation.
//!
//! The countdown is a tick-driven state machine. It does not use internal
//! threads or read the wall clock - the caller is responsible for calling
//! `tick()` once per second (see [`super::clock`]).
//!
//! ## State Transitions
//!
//! ```text
//! Paused <-> Running -> Expired
//!    \          |
//!     `----> Cancelled
//! ```
//!
//! ## Usage
//!
//! ```
//! use timeguard_core::timer::{Countdown, TickOutcome};
//!
//! let mut countdown = Countdown::start(2).unwrap();
//! countdown.resume();
//! assert_eq!(countdown.tick(), TickOutcome::Ticked { remaining_secs: 1 });
//! assert_eq!(countdown.tick(), TickOutcome::Expired);
//! assert_eq!(countdown.tick(), TickOutcome::Idle);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    /// Created or paused; remaining time is frozen.
    Paused,
    Running,
    /// Reached zero. The terminal outcome has already been reported.
    Expired,
    /// Discarded by the owner. Never reports a terminal outcome.
    Cancelled,
}

/// Result of a single `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Idle,
    Ticked { remaining_secs: u64 },
    /// Remaining time just reached zero. Returned exactly once.
    Expired,
}

/// Single countdown counting whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCountdown")]
pub struct Countdown {
    duration_secs: u64,
    remaining_secs: u64,
    state: CountdownState,
}

/// Unchecked wire form, validated into a [`Countdown`] on load.
#[derive(Deserialize)]
struct RawCountdown {
    duration_secs: u64,
    remaining_secs: u64,
    state: CountdownState,
}

impl TryFrom<RawCountdown> for Countdown {
    type Error = CoreError;

    fn try_from(raw: RawCountdown) -> Result<Self> {
        if raw.duration_secs == 0 {
            return Err(CoreError::InvalidDuration);
        }
        if raw.remaining_secs > raw.duration_secs {
            return Err(ValidationError::InvalidValue {
                field: "remaining_secs".into(),
                message: format!(
                    "{} exceeds the duration of {}",
                    raw.remaining_secs, raw.duration_secs
                ),
            }
            .into());
        }
        Ok(Self {
            duration_secs: raw.duration_secs,
            remaining_secs: raw.remaining_secs,
            state: raw.state,
        })
    }
}

impl Countdown {
    /// Create a countdown of `duration_secs`, not yet running.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDuration`] when `duration_secs` is zero.
    pub fn start(duration_secs: u64) -> Result<Self> {
        if duration_secs == 0 {
            return Err(CoreError::InvalidDuration);
        }
        Ok(Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: CountdownState::Paused,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration_secs.saturating_sub(self.remaining_secs)
    }

    /// 0.0 ..= 100.0 progress.
    pub fn progress_pct(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        let pct = self.elapsed_secs() as f64 / self.duration_secs as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }

    /// Whether at least `threshold_pct` percent of the duration has elapsed.
    ///
    /// Integer comparison, so exact thresholds such as 36 of 45 minutes at
    /// 80% are not lost to float rounding.
    pub fn has_reached(&self, threshold_pct: u8) -> bool {
        self.elapsed_secs() * 100 >= u64::from(threshold_pct) * self.duration_secs
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start ticking. Returns `false` when nothing changed (already running,
    /// expired or cancelled).
    pub fn resume(&mut self) -> bool {
        match self.state {
            CountdownState::Paused => {
                self.state = CountdownState::Running;
                true
            }
            _ => false,
        }
    }

    /// Stop ticking without touching the remaining time.
    pub fn pause(&mut self) -> bool {
        match self.state {
            CountdownState::Running => {
                self.state = CountdownState::Paused;
                true
            }
            _ => false,
        }
    }

    /// Stop for good. No further outcome other than `Idle` is produced.
    pub fn cancel(&mut self) {
        if self.state != CountdownState::Expired {
            self.state = CountdownState::Cancelled;
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = CountdownState::Expired;
            return TickOutcome::Expired;
        }
        TickOutcome::Ticked {
            remaining_secs: self.remaining_secs,
        }
    }
}
