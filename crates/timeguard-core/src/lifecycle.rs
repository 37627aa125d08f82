//! Mission lifecycle state machine.
//!
//! All application state lives in one [`AppState`] value and [`reduce`] is
//! its only mutator: every user intent and every clock tick goes through it.
//! A rejected intent leaves the state exactly as it was.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Selected -> Running -> (Completed | Cancelled)
//!                       ^  |
//!                       '--' pause / resume
//! ```
//!
//! Completed and Cancelled end the session; the mission can be selected and
//! started again from there.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::focus_lock::{FocusLockConfig, FocusLockLevel};
use crate::ledger::{self, ExchangeTier, Ledger, RelaxSession};
use crate::mission::{MissionCatalog, NewMission};
use crate::stats::DailyStats;
use crate::timer::{Countdown, TickOutcome};

/// Policy knobs. Loaded from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Early-finish floor, percent of the mission elapsed.
    pub finish_threshold_pct: u8,
    /// Longest single relax session in minutes.
    pub relax_cap_min: u64,
    pub tiers: Vec<ExchangeTier>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            finish_threshold_pct: 80,
            relax_cap_min: 30,
            tiers: ledger::default_tiers(),
        }
    }
}

/// The countdown bound to the mission being worked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSession {
    pub mission_id: String,
    /// Reward locked in when the session started.
    pub points: u64,
    pub countdown: Countdown,
    /// A cancel was requested while running and awaits confirmation.
    #[serde(default)]
    pub cancel_pending: bool,
}

/// Lifecycle position of the current mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Lifecycle {
    Idle,
    Selected { mission_id: String },
    Running(TimerSession),
    Completed { mission_id: String, points_awarded: u64 },
    Cancelled { mission_id: String },
}

impl Lifecycle {
    pub fn kind(&self) -> LifecycleState {
        match self {
            Lifecycle::Idle => LifecycleState::Idle,
            Lifecycle::Selected { .. } => LifecycleState::Selected,
            Lifecycle::Running(_) => LifecycleState::Running,
            Lifecycle::Completed { .. } => LifecycleState::Completed,
            Lifecycle::Cancelled { .. } => LifecycleState::Cancelled,
        }
    }

    pub fn mission_id(&self) -> Option<&str> {
        match self {
            Lifecycle::Idle => None,
            Lifecycle::Selected { mission_id }
            | Lifecycle::Completed { mission_id, .. }
            | Lifecycle::Cancelled { mission_id } => Some(mission_id.as_str()),
            Lifecycle::Running(session) => Some(session.mission_id.as_str()),
        }
    }

    pub fn session(&self) -> Option<&TimerSession> {
        match self {
            Lifecycle::Running(session) => Some(session),
            _ => None,
        }
    }

    /// Move the running session out, leaving `Idle` behind.
    fn take_session(&mut self) -> Result<TimerSession> {
        match std::mem::replace(self, Lifecycle::Idle) {
            Lifecycle::Running(session) => Ok(session),
            other => {
                *self = other;
                Err(CoreError::NoActiveSession)
            }
        }
    }

    fn session_mut(&mut self) -> Result<&mut TimerSession> {
        match self {
            Lifecycle::Running(session) => Ok(session),
            _ => Err(CoreError::NoActiveSession),
        }
    }
}

/// Field-less view of [`Lifecycle`] for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Idle,
    Selected,
    Running,
    Completed,
    Cancelled,
}

/// User intents and clock ticks accepted by [`reduce`].
#[derive(Debug, Clone)]
pub enum Intent {
    AddMission(NewMission),
    DeleteMission(String),
    Select(String),
    Start(String),
    Pause,
    Resume,
    Finish,
    /// An unconfirmed cancel of a running session only raises a
    /// confirmation request.
    Cancel { confirmed: bool },
    DismissCancel,
    /// One second of wall-clock time.
    Tick,
    /// Buy the exchange tier priced at `cost`.
    Exchange { cost: u64 },
    StartRelax,
    StopRelax,
    SetFocusLock(bool),
    SetFocusLockLevel(FocusLockLevel),
}

impl Intent {
    fn name(&self) -> &'static str {
        match self {
            Intent::AddMission(_) => "add_mission",
            Intent::DeleteMission(_) => "delete_mission",
            Intent::Select(_) => "select",
            Intent::Start(_) => "start",
            Intent::Pause => "pause",
            Intent::Resume => "resume",
            Intent::Finish => "finish",
            Intent::Cancel { .. } => "cancel",
            Intent::DismissCancel => "dismiss_cancel",
            Intent::Tick => "tick",
            Intent::Exchange { .. } => "exchange",
            Intent::StartRelax => "start_relax",
            Intent::StopRelax => "stop_relax",
            Intent::SetFocusLock(_) => "set_focus_lock",
            Intent::SetFocusLockLevel(_) => "set_focus_lock_level",
        }
    }
}

/// Everything the application knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub catalog: MissionCatalog,
    pub lifecycle: Lifecycle,
    pub ledger: Ledger,
    #[serde(default)]
    pub relax: Option<RelaxSession>,
    pub stats: DailyStats,
    pub focus_lock: FocusLockConfig,
    pub rules: Rules,
}

impl AppState {
    pub fn new(rules: Rules, today: NaiveDate) -> Self {
        Self {
            catalog: MissionCatalog::new(),
            lifecycle: Lifecycle::Idle,
            ledger: Ledger::default(),
            relax: None,
            stats: DailyStats::new(today),
            focus_lock: FocusLockConfig::default(),
            rules,
        }
    }

    pub fn with_ledger(mut self, ledger: Ledger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn with_focus_lock(mut self, focus_lock: FocusLockConfig) -> Self {
        self.focus_lock = focus_lock;
        self
    }

    /// Whether any countdown is currently ticking.
    pub fn is_ticking(&self) -> bool {
        self.lifecycle
            .session()
            .is_some_and(|s| s.countdown.is_running())
            || self.relax.as_ref().is_some_and(|r| r.countdown().is_running())
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = self.lifecycle.session();
        Snapshot {
            state: self.lifecycle.kind(),
            mission_id: self.lifecycle.mission_id().map(str::to_string),
            remaining_secs: session.map(|s| s.countdown.remaining_secs()).unwrap_or(0),
            total_secs: session.map(|s| s.countdown.duration_secs()).unwrap_or(0),
            progress_pct: session.map(|s| s.countdown.progress_pct()).unwrap_or(0.0),
            running: session.is_some_and(|s| s.countdown.is_running()),
            cancel_pending: session.is_some_and(|s| s.cancel_pending),
            ledger: self.ledger,
            relax_remaining_secs: self.relax.as_ref().map(RelaxSession::remaining_secs),
            stats: self.stats.clone(),
            focus_lock: self.focus_lock,
        }
    }
}

/// Render-ready view of [`AppState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: LifecycleState,
    pub mission_id: Option<String>,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub progress_pct: f64,
    pub running: bool,
    pub cancel_pending: bool,
    pub ledger: Ledger,
    pub relax_remaining_secs: Option<u64>,
    pub stats: DailyStats,
    pub focus_lock: FocusLockConfig,
}

/// Apply `intent` to `state`, stamping events with the current time.
///
/// # Errors
///
/// Returns the reason the intent was rejected. The state is unchanged in
/// that case.
pub fn reduce(state: &mut AppState, intent: Intent) -> Result<Vec<Event>> {
    reduce_at(state, intent, Utc::now())
}

/// Apply `intent` as of `at`. Same state, intent and time always give the
/// same result.
///
/// # Errors
///
/// See [`reduce`].
pub fn reduce_at(state: &mut AppState, intent: Intent, at: DateTime<Utc>) -> Result<Vec<Event>> {
    let name = intent.name();
    let result = apply(state, intent, at);
    if let Err(e) = &result {
        tracing::warn!(intent = name, error = %e, "intent rejected");
    }
    result
}

fn apply(state: &mut AppState, intent: Intent, at: DateTime<Utc>) -> Result<Vec<Event>> {
    match intent {
        Intent::AddMission(fields) => {
            let mission = state.catalog.create(fields)?;
            tracing::info!(mission_id = %mission.id, points = mission.points, "mission added");
            Ok(vec![Event::MissionAdded {
                mission_id: mission.id,
                points: mission.points,
                at,
            }])
        }
        Intent::DeleteMission(id) => {
            if state.lifecycle.session().is_some_and(|s| s.mission_id == id) {
                return Err(CoreError::SessionAlreadyActive);
            }
            state.catalog.delete(&id)?;
            if state.lifecycle.mission_id() == Some(id.as_str()) {
                state.lifecycle = Lifecycle::Idle;
            }
            Ok(vec![Event::MissionDeleted { mission_id: id, at }])
        }
        Intent::Select(id) => {
            if state.lifecycle.session().is_some() {
                return Err(CoreError::SessionAlreadyActive);
            }
            state.catalog.get(&id)?;
            state.lifecycle = Lifecycle::Selected {
                mission_id: id.clone(),
            };
            Ok(vec![Event::MissionSelected { mission_id: id, at }])
        }
        Intent::Start(id) => {
            if state.lifecycle.session().is_some() || state.relax.is_some() {
                return Err(CoreError::SessionAlreadyActive);
            }
            let mission = state.catalog.get(&id)?;
            let mut countdown = Countdown::start(mission.duration_secs())?;
            countdown.resume();
            let duration_secs = countdown.duration_secs();
            tracing::info!(mission_id = %id, duration_secs, "mission started");
            state.lifecycle = Lifecycle::Running(TimerSession {
                mission_id: id.clone(),
                points: mission.points,
                countdown,
                cancel_pending: false,
            });
            Ok(vec![Event::TimerStarted {
                mission_id: id,
                duration_secs,
                at,
            }])
        }
        Intent::Pause => {
            let session = state.lifecycle.session_mut()?;
            if !session.countdown.pause() {
                return Ok(Vec::new());
            }
            tracing::debug!(remaining_secs = session.countdown.remaining_secs(), "paused");
            Ok(vec![Event::TimerPaused {
                remaining_secs: session.countdown.remaining_secs(),
                at,
            }])
        }
        Intent::Resume => {
            let session = state.lifecycle.session_mut()?;
            if !session.countdown.resume() {
                return Ok(Vec::new());
            }
            tracing::debug!(remaining_secs = session.countdown.remaining_secs(), "resumed");
            Ok(vec![Event::TimerResumed {
                remaining_secs: session.countdown.remaining_secs(),
                at,
            }])
        }
        Intent::Finish => {
            let threshold_pct = state.rules.finish_threshold_pct;
            let session = state.lifecycle.session_mut()?;
            let countdown = &session.countdown;
            if countdown.remaining_secs() > 0 && !countdown.has_reached(threshold_pct) {
                return Err(CoreError::FinishNotEligible {
                    progress_pct: countdown.progress_pct(),
                    threshold_pct,
                });
            }
            let session = state.lifecycle.take_session()?;
            Ok(vec![complete(state, session, false, at)])
        }
        Intent::Cancel { confirmed } => {
            let session = state.lifecycle.session_mut()?;
            if session.countdown.is_running() && !confirmed {
                session.cancel_pending = true;
                return Ok(vec![Event::CancelConfirmationRequested {
                    mission_id: session.mission_id.clone(),
                    at,
                }]);
            }
            session.countdown.cancel();
            let mission_id = session.mission_id.clone();
            let remaining_secs = session.countdown.remaining_secs();
            tracing::info!(mission_id = %mission_id, remaining_secs, "mission cancelled");
            state.lifecycle = Lifecycle::Cancelled {
                mission_id: mission_id.clone(),
            };
            Ok(vec![Event::MissionCancelled {
                mission_id,
                remaining_secs,
                at,
            }])
        }
        Intent::DismissCancel => {
            let session = state.lifecycle.session_mut()?;
            if !session.cancel_pending {
                return Ok(Vec::new());
            }
            session.cancel_pending = false;
            Ok(vec![Event::CancelDismissed {
                mission_id: session.mission_id.clone(),
                at,
            }])
        }
        Intent::Tick => Ok(tick(state, at)),
        Intent::Exchange { cost } => {
            let tier = ledger::find_tier(&state.rules.tiers, cost)?;
            state.ledger.exchange(tier.cost, tier.minutes)?;
            tracing::info!(cost = tier.cost, minutes = tier.minutes, "points exchanged");
            Ok(vec![Event::PointsExchanged {
                cost: tier.cost,
                minutes: tier.minutes,
                total_points: state.ledger.total_points,
                relax_time_minutes: state.ledger.relax_time_minutes,
                at,
            }])
        }
        Intent::StartRelax => {
            if state.relax.is_some() || state.lifecycle.session().is_some() {
                return Err(CoreError::SessionAlreadyActive);
            }
            let session =
                RelaxSession::start(state.ledger.relax_time_minutes, state.rules.relax_cap_min)?;
            let duration_secs = session.countdown().duration_secs();
            tracing::info!(duration_secs, "relax started");
            state.relax = Some(session);
            Ok(vec![Event::RelaxStarted { duration_secs, at }])
        }
        Intent::StopRelax => {
            let mut session = state.relax.take().ok_or(CoreError::NoActiveSession)?;
            session.stop();
            tracing::info!(remaining_secs = session.remaining_secs(), "relax stopped");
            Ok(vec![Event::RelaxEnded { expired: false, at }])
        }
        Intent::SetFocusLock(enabled) => {
            state.focus_lock.enabled = enabled;
            Ok(vec![focus_lock_changed(state, at)])
        }
        Intent::SetFocusLockLevel(level) => {
            state.focus_lock.level = level;
            Ok(vec![focus_lock_changed(state, at)])
        }
    }
}

fn tick(state: &mut AppState, at: DateTime<Utc>) -> Vec<Event> {
    let mut events = Vec::new();

    let outcome = match &mut state.lifecycle {
        Lifecycle::Running(session) => session.countdown.tick(),
        _ => TickOutcome::Idle,
    };
    match outcome {
        TickOutcome::Expired => {
            if let Ok(session) = state.lifecycle.take_session() {
                events.push(complete(state, session, true, at));
            }
        }
        TickOutcome::Ticked { remaining_secs } => {
            tracing::trace!(remaining_secs, "focus tick");
        }
        TickOutcome::Idle => {}
    }

    if let Some(relax) = &mut state.relax {
        if relax.tick() == TickOutcome::Expired {
            state.relax = None;
            tracing::info!("relax finished");
            events.push(Event::RelaxEnded { expired: true, at });
        }
    }

    events
}

/// Close `session` with a payout. Caller has checked eligibility.
fn complete(
    state: &mut AppState,
    session: TimerSession,
    expired: bool,
    at: DateTime<Utc>,
) -> Event {
    let elapsed_secs = session.countdown.elapsed_secs();
    let focus_minutes = (elapsed_secs + 30) / 60;
    state.ledger.credit(session.points);
    state.stats.record_completion(focus_minutes);
    if let Ok(mission) = state.catalog.get_mut(&session.mission_id) {
        mission.progress = 100;
        mission.completed = true;
    }

    tracing::info!(
        mission_id = %session.mission_id,
        points = session.points,
        focus_minutes,
        expired,
        "mission completed"
    );
    state.lifecycle = Lifecycle::Completed {
        mission_id: session.mission_id.clone(),
        points_awarded: session.points,
    };
    Event::MissionCompleted {
        mission_id: session.mission_id,
        points_awarded: session.points,
        focus_minutes,
        expired,
        at,
    }
}

fn focus_lock_changed(state: &AppState, at: DateTime<Utc>) -> Event {
    Event::FocusLockChanged {
        enabled: state.focus_lock.enabled,
        level: state.focus_lock.level,
        at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::Difficulty;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn state_with_mission(duration_min: u32, difficulty: Difficulty) -> (AppState, String) {
        let mut state = AppState::new(Rules::default(), today());
        let mission = state
            .catalog
            .create(NewMission {
                name: "Write report".into(),
                duration_min,
                difficulty,
                ..Default::default()
            })
            .unwrap();
        (state, mission.id)
    }

    fn ticks(state: &mut AppState, n: u64) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(reduce(state, Intent::Tick).unwrap());
        }
        events
    }

    #[test]
    fn select_then_start_runs_the_countdown() {
        let (mut state, id) = state_with_mission(1, Difficulty::Easy);
        reduce(&mut state, Intent::Select(id.clone())).unwrap();
        assert_eq!(state.lifecycle.kind(), LifecycleState::Selected);

        reduce(&mut state, Intent::Start(id)).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.state, LifecycleState::Running);
        assert!(snap.running);
        assert_eq!(snap.remaining_secs, 60);
    }

    #[test]
    fn select_unknown_mission_fails() {
        let mut state = AppState::new(Rules::default(), today());
        let err = reduce(&mut state, Intent::Select("nope".into())).unwrap_err();
        assert!(matches!(err, CoreError::MissionNotFound(_)));
        assert_eq!(state.lifecycle, Lifecycle::Idle);
    }

    #[test]
    fn second_start_is_rejected() {
        let (mut state, id) = state_with_mission(5, Difficulty::Easy);
        reduce(&mut state, Intent::Start(id.clone())).unwrap();
        let before = state.clone();
        assert!(matches!(
            reduce(&mut state, Intent::Start(id)),
            Err(CoreError::SessionAlreadyActive)
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn early_finish_is_rejected_without_payout() {
        let (mut state, id) = state_with_mission(10, Difficulty::Medium);
        reduce(&mut state, Intent::Start(id)).unwrap();
        ticks(&mut state, 60);
        let before = state.clone();
        let err = reduce(&mut state, Intent::Finish).unwrap_err();
        assert!(matches!(
            err,
            CoreError::FinishNotEligible { threshold_pct: 80, .. }
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn finish_at_threshold_pays_once() {
        let (mut state, id) = state_with_mission(45, Difficulty::Medium);
        let points = state.catalog.get(&id).unwrap().points;
        reduce(&mut state, Intent::Start(id.clone())).unwrap();
        ticks(&mut state, 36 * 60);

        let events = reduce(&mut state, Intent::Finish).unwrap();
        assert!(matches!(
            events.as_slice(),
            [Event::MissionCompleted { expired: false, focus_minutes: 36, .. }]
        ));
        assert_eq!(state.ledger.total_points, points);
        assert_eq!(state.stats.completed_count, 1);
        assert_eq!(state.stats.focus_minutes, 36);

        let mission = state.catalog.get(&id).unwrap();
        assert!(mission.completed);
        assert_eq!(mission.progress, 100);

        assert!(matches!(
            reduce(&mut state, Intent::Finish),
            Err(CoreError::NoActiveSession)
        ));
        assert_eq!(state.ledger.total_points, points);
    }

    #[test]
    fn expiry_completes_automatically() {
        let (mut state, id) = state_with_mission(1, Difficulty::Hard);
        reduce(&mut state, Intent::Start(id)).unwrap();
        let events = ticks(&mut state, 60);
        assert!(matches!(
            events.as_slice(),
            [Event::MissionCompleted { expired: true, points_awarded: 3, focus_minutes: 1, .. }]
        ));
        assert_eq!(state.lifecycle.kind(), LifecycleState::Completed);
        assert_eq!(state.ledger.total_points, 3);
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let (mut state, id) = state_with_mission(2, Difficulty::Easy);
        reduce(&mut state, Intent::Start(id)).unwrap();
        ticks(&mut state, 10);
        reduce(&mut state, Intent::Pause).unwrap();
        ticks(&mut state, 30);
        assert_eq!(state.snapshot().remaining_secs, 110);
        assert_eq!(state.lifecycle.kind(), LifecycleState::Running);

        // Second pause is a no-op.
        assert!(reduce(&mut state, Intent::Pause).unwrap().is_empty());

        reduce(&mut state, Intent::Resume).unwrap();
        ticks(&mut state, 5);
        assert_eq!(state.snapshot().remaining_secs, 105);
    }

    #[test]
    fn pause_without_session_fails() {
        let mut state = AppState::new(Rules::default(), today());
        assert!(matches!(
            reduce(&mut state, Intent::Pause),
            Err(CoreError::NoActiveSession)
        ));
        assert!(matches!(
            reduce(&mut state, Intent::Cancel { confirmed: true }),
            Err(CoreError::NoActiveSession)
        ));
    }

    #[test]
    fn cancel_while_running_needs_confirmation() {
        let (mut state, id) = state_with_mission(5, Difficulty::Easy);
        reduce(&mut state, Intent::Start(id.clone())).unwrap();
        ticks(&mut state, 100);

        let events = reduce(&mut state, Intent::Cancel { confirmed: false }).unwrap();
        assert!(matches!(
            events.as_slice(),
            [Event::CancelConfirmationRequested { .. }]
        ));
        assert!(state.snapshot().cancel_pending);
        assert_eq!(state.lifecycle.kind(), LifecycleState::Running);

        reduce(&mut state, Intent::DismissCancel).unwrap();
        assert!(!state.snapshot().cancel_pending);

        reduce(&mut state, Intent::Cancel { confirmed: true }).unwrap();
        assert_eq!(
            state.lifecycle,
            Lifecycle::Cancelled { mission_id: id.clone() }
        );
        assert_eq!(state.ledger, Ledger::default());
        assert_eq!(state.catalog.get(&id).unwrap().progress, 0);
        assert_eq!(state.stats.completed_count, 0);
    }

    #[test]
    fn cancel_while_paused_is_immediate() {
        let (mut state, id) = state_with_mission(5, Difficulty::Easy);
        reduce(&mut state, Intent::Start(id)).unwrap();
        reduce(&mut state, Intent::Pause).unwrap();
        let events = reduce(&mut state, Intent::Cancel { confirmed: false }).unwrap();
        assert!(matches!(events.as_slice(), [Event::MissionCancelled { .. }]));
        assert_eq!(state.lifecycle.kind(), LifecycleState::Cancelled);
    }

    #[test]
    fn completed_mission_can_restart() {
        let (mut state, id) = state_with_mission(1, Difficulty::Easy);
        reduce(&mut state, Intent::Start(id.clone())).unwrap();
        ticks(&mut state, 60);
        reduce(&mut state, Intent::Select(id.clone())).unwrap();
        reduce(&mut state, Intent::Start(id)).unwrap();
        assert_eq!(state.snapshot().progress_pct, 0.0);
        assert_eq!(state.snapshot().remaining_secs, 60);
    }

    #[test]
    fn delete_running_mission_is_rejected() {
        let (mut state, id) = state_with_mission(5, Difficulty::Easy);
        reduce(&mut state, Intent::Start(id.clone())).unwrap();
        assert!(matches!(
            reduce(&mut state, Intent::DeleteMission(id.clone())),
            Err(CoreError::SessionAlreadyActive)
        ));
        reduce(&mut state, Intent::Cancel { confirmed: true }).unwrap();
        reduce(&mut state, Intent::DeleteMission(id)).unwrap();
        assert_eq!(state.lifecycle, Lifecycle::Idle);
        assert!(state.catalog.is_empty());
    }

    #[test]
    fn exchange_uses_configured_tiers() {
        let mut state = AppState::new(Rules::default(), today()).with_ledger(Ledger::new(80, 0));
        assert!(matches!(
            reduce(&mut state, Intent::Exchange { cost: 100 }),
            Err(CoreError::InsufficientPoints { balance: 80, cost: 100 })
        ));
        assert_eq!(state.ledger, Ledger::new(80, 0));

        reduce(&mut state, Intent::Exchange { cost: 50 }).unwrap();
        assert_eq!(state.ledger, Ledger::new(30, 5));

        assert!(matches!(
            reduce(&mut state, Intent::Exchange { cost: 10 }),
            Err(CoreError::UnknownExchangeTier(10))
        ));
    }

    #[test]
    fn relax_session_runs_out_without_spending_balance() {
        let mut state = AppState::new(Rules::default(), today()).with_ledger(Ledger::new(0, 1));
        reduce(&mut state, Intent::StartRelax).unwrap();
        assert_eq!(state.snapshot().relax_remaining_secs, Some(60));
        assert!(state.is_ticking());

        let events = ticks(&mut state, 60);
        assert!(matches!(
            events.as_slice(),
            [Event::RelaxEnded { expired: true, .. }]
        ));
        assert!(state.relax.is_none());
        assert_eq!(state.ledger.relax_time_minutes, 1);
    }

    #[test]
    fn relax_and_mission_do_not_overlap() {
        let (mut state, id) = state_with_mission(5, Difficulty::Easy);
        state.ledger = Ledger::new(0, 10);
        reduce(&mut state, Intent::StartRelax).unwrap();
        assert!(matches!(
            reduce(&mut state, Intent::Start(id)),
            Err(CoreError::SessionAlreadyActive)
        ));
        reduce(&mut state, Intent::StopRelax).unwrap();
        assert!(matches!(
            reduce(&mut state, Intent::StopRelax),
            Err(CoreError::NoActiveSession)
        ));
    }

    #[test]
    fn focus_lock_is_recorded() {
        let mut state = AppState::new(Rules::default(), today());
        reduce(&mut state, Intent::SetFocusLockLevel(FocusLockLevel::Strict)).unwrap();
        reduce(&mut state, Intent::SetFocusLock(false)).unwrap();
        assert_eq!(
            state.focus_lock,
            FocusLockConfig {
                enabled: false,
                level: FocusLockLevel::Strict
            }
        );
    }

    #[test]
    fn state_roundtrips_through_json() {
        let (mut state, id) = state_with_mission(5, Difficulty::Easy);
        reduce(&mut state, Intent::Start(id)).unwrap();
        ticks(&mut state, 7);
        let json = serde_json::to_string(&state).unwrap();
        let restored: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn reduce_at_is_deterministic() {
        let (mut state, id) = state_with_mission(1, Difficulty::Hard);
        reduce(&mut state, Intent::Start(id)).unwrap();
        for _ in 0..59 {
            reduce(&mut state, Intent::Tick).unwrap();
        }
        let at = DateTime::parse_from_rfc3339("2026-03-02T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut other = state.clone();
        let first = reduce_at(&mut state, Intent::Tick, at).unwrap();
        let second = reduce_at(&mut other, Intent::Tick, at).unwrap();
        assert_eq!(first, second);
        assert_eq!(state, other);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].at(), at);
    }
}
