//! Per-day focus statistics and the display streak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub completed_count: u32,
    pub focus_minutes: u64,
    /// Consecutive productive days before `date`. Display only.
    #[serde(default)]
    pub streak_days: u32,
}

impl DailyStats {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            completed_count: 0,
            focus_minutes: 0,
            streak_days: 0,
        }
    }

    pub fn record_completion(&mut self, focus_minutes: u64) {
        self.completed_count += 1;
        self.focus_minutes += focus_minutes;
    }

    /// Move to `today`, resetting the counters. Returns `true` when the date
    /// changed.
    ///
    /// The streak grows only when the previous day was yesterday and had at
    /// least one completion.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today <= self.date {
            return false;
        }
        let consecutive = self.date.succ_opt() == Some(today);
        self.streak_days = if consecutive && self.completed_count > 0 {
            self.streak_days + 1
        } else {
            0
        };
        self.date = today;
        self.completed_count = 0;
        self.focus_minutes = 0;
        true
    }
}
