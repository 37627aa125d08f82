//! Points balance and relax-time balance.
//!
//! Points are earned by completing missions and spent on exchange tiers that
//! grant relax minutes. Relax minutes are spent at exchange time: running a
//! relax session never decrements the balance.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::timer::{Countdown, TickOutcome};

/// One row of the points -> relax minutes price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTier {
    pub cost: u64,
    pub minutes: u64,
}

/// Default price list.
pub fn default_tiers() -> Vec<ExchangeTier> {
    vec![
        ExchangeTier { cost: 50, minutes: 5 },
        ExchangeTier { cost: 100, minutes: 10 },
        ExchangeTier { cost: 200, minutes: 20 },
        ExchangeTier { cost: 400, minutes: 30 },
    ]
}

/// Find the tier priced at exactly `cost`.
pub fn find_tier(tiers: &[ExchangeTier], cost: u64) -> Result<ExchangeTier> {
    tiers
        .iter()
        .copied()
        .find(|t| t.cost == cost)
        .ok_or(CoreError::UnknownExchangeTier(cost))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub total_points: u64,
    pub relax_time_minutes: u64,
}

impl Ledger {
    pub fn new(total_points: u64, relax_time_minutes: u64) -> Self {
        Self {
            total_points,
            relax_time_minutes,
        }
    }

    pub fn credit(&mut self, points: u64) {
        self.total_points = self.total_points.saturating_add(points);
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.total_points >= cost
    }

    /// Trade `cost` points for `minutes` of relax time. All or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InsufficientPoints`] when the balance is below
    /// `cost`; neither balance changes.
    pub fn exchange(&mut self, cost: u64, minutes: u64) -> Result<()> {
        let remaining = self
            .total_points
            .checked_sub(cost)
            .ok_or(CoreError::InsufficientPoints {
                balance: self.total_points,
                cost,
            })?;
        self.total_points = remaining;
        self.relax_time_minutes = self.relax_time_minutes.saturating_add(minutes);
        Ok(())
    }
}

/// A running relax break. Independent of any mission session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaxSession {
    countdown: Countdown,
}

impl RelaxSession {
    /// Start a break of `min(balance, cap)` minutes. The countdown runs
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDuration`] when the balance or the cap is
    /// zero.
    pub fn start(balance_minutes: u64, cap_minutes: u64) -> Result<Self> {
        let minutes = balance_minutes.min(cap_minutes);
        let mut countdown = Countdown::start(minutes.saturating_mul(60))?;
        countdown.resume();
        Ok(Self { countdown })
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn remaining_secs(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.countdown.tick()
    }

    pub fn stop(&mut self) {
        self.countdown.cancel();
    }
}
