use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::focus_lock::FocusLockLevel;

/// Every state change in the system produces an Event.
/// The presentation layer renders them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    MissionAdded {
        mission_id: String,
        points: u64,
        at: DateTime<Utc>,
    },
    MissionDeleted {
        mission_id: String,
        at: DateTime<Utc>,
    },
    MissionSelected {
        mission_id: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mission_id: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Running session asked to cancel; waiting for confirmation.
    CancelConfirmationRequested {
        mission_id: String,
        at: DateTime<Utc>,
    },
    CancelDismissed {
        mission_id: String,
        at: DateTime<Utc>,
    },
    MissionCompleted {
        mission_id: String,
        points_awarded: u64,
        focus_minutes: u64,
        /// True when the countdown ran out rather than a manual finish.
        expired: bool,
        at: DateTime<Utc>,
    },
    MissionCancelled {
        mission_id: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PointsExchanged {
        cost: u64,
        minutes: u64,
        total_points: u64,
        relax_time_minutes: u64,
        at: DateTime<Utc>,
    },
    RelaxStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    RelaxEnded {
        /// True when the break ran its full length.
        expired: bool,
        at: DateTime<Utc>,
    },
    FocusLockChanged {
        enabled: bool,
        level: FocusLockLevel,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::MissionAdded { at, .. }
            | Event::MissionDeleted { at, .. }
            | Event::MissionSelected { at, .. }
            | Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerResumed { at, .. }
            | Event::CancelConfirmationRequested { at, .. }
            | Event::CancelDismissed { at, .. }
            | Event::MissionCompleted { at, .. }
            | Event::MissionCancelled { at, .. }
            | Event::PointsExchanged { at, .. }
            | Event::RelaxStarted { at, .. }
            | Event::RelaxEnded { at, .. }
            | Event::FocusLockChanged { at, .. } => *at,
        }
    }
}
