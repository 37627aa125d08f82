//! Integration tests for the mission lifecycle.
//!
//! These drive the controller end to end with a manual clock: missions are
//! created, run, finished or cancelled, and points flow into relax time.

use chrono::NaiveDate;
use timeguard_core::{
    AppState, Controller, CoreError, Difficulty, Event, Intent, Ledger, LifecycleState,
    ManualClock, NewMission, Rules,
};

fn controller_with(ledger: Ledger) -> Controller {
    let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    Controller::new(AppState::new(Rules::default(), today).with_ledger(ledger))
}

fn add_mission(controller: &mut Controller, duration_min: u32, difficulty: Difficulty) -> String {
    controller
        .dispatch(Intent::AddMission(NewMission {
            name: "Client Presentation Prep".into(),
            description: "Slides and talking points".into(),
            duration_min,
            difficulty,
            ..Default::default()
        }))
        .unwrap();
    controller.state().catalog.list().last().unwrap().id.clone()
}

#[test]
fn test_thirty_minute_medium_mission_is_worth_75() {
    let mut controller = controller_with(Ledger::default());
    let id = add_mission(&mut controller, 30, Difficulty::Medium);
    assert_eq!(controller.state().catalog.get(&id).unwrap().points, 75);
}

#[test]
fn test_finish_after_36_of_45_minutes() {
    let mut controller = controller_with(Ledger::default());
    let id = add_mission(&mut controller, 45, Difficulty::Hard);
    let points = controller.state().catalog.get(&id).unwrap().points;

    controller.dispatch(Intent::Select(id.clone())).unwrap();
    controller.dispatch(Intent::Start(id)).unwrap();
    controller.run(&mut ManualClock::new(36 * 60)).unwrap();
    assert_eq!(controller.snapshot().progress_pct, 80.0);

    controller.dispatch(Intent::Finish).unwrap();
    let snap = controller.snapshot();
    assert_eq!(snap.state, LifecycleState::Completed);
    assert_eq!(snap.ledger.total_points, points);
    assert_eq!(snap.stats.completed_count, 1);
    assert_eq!(snap.stats.focus_minutes, 36);
}

#[test]
fn test_finish_just_below_threshold_fails() {
    let mut controller = controller_with(Ledger::new(10, 0));
    let id = add_mission(&mut controller, 45, Difficulty::Hard);
    controller.dispatch(Intent::Start(id)).unwrap();
    controller.run(&mut ManualClock::new(36 * 60 - 1)).unwrap();

    let err = controller.dispatch(Intent::Finish).unwrap_err();
    assert!(matches!(err, CoreError::FinishNotEligible { .. }));
    assert_eq!(controller.snapshot().ledger, Ledger::new(10, 0));
    assert_eq!(controller.snapshot().state, LifecycleState::Running);
}

#[test]
fn test_cancel_never_touches_the_ledger() {
    let mut controller = controller_with(Ledger::new(120, 15));
    let id = add_mission(&mut controller, 20, Difficulty::Easy);
    controller.dispatch(Intent::Start(id)).unwrap();
    controller.run(&mut ManualClock::new(19 * 60)).unwrap();

    controller.dispatch(Intent::Cancel { confirmed: false }).unwrap();
    assert_eq!(controller.snapshot().state, LifecycleState::Running);
    controller.dispatch(Intent::Cancel { confirmed: true }).unwrap();

    let snap = controller.snapshot();
    assert_eq!(snap.state, LifecycleState::Cancelled);
    assert_eq!(snap.ledger, Ledger::new(120, 15));
    assert_eq!(snap.stats.completed_count, 0);
}

#[test]
fn test_exchange_scenarios() {
    let mut poor = controller_with(Ledger::new(80, 0));
    assert!(matches!(
        poor.dispatch(Intent::Exchange { cost: 100 }),
        Err(CoreError::InsufficientPoints { balance: 80, cost: 100 })
    ));
    assert_eq!(poor.snapshot().ledger, Ledger::new(80, 0));

    let mut rich = controller_with(Ledger::new(200, 5));
    rich.dispatch(Intent::Exchange { cost: 200 }).unwrap();
    assert_eq!(rich.snapshot().ledger, Ledger::new(0, 25));
}

#[test]
fn test_earn_then_relax() {
    let mut controller = controller_with(Ledger::default());
    // 20 min Easy -> 40 points; run it out twice for 80.
    let id = add_mission(&mut controller, 20, Difficulty::Easy);
    for _ in 0..2 {
        controller.dispatch(Intent::Start(id.clone())).unwrap();
        let events = controller.run(&mut ManualClock::new(u64::MAX)).unwrap();
        assert!(matches!(
            events.last(),
            Some(Event::MissionCompleted { expired: true, .. })
        ));
    }
    assert_eq!(controller.snapshot().ledger.total_points, 80);

    controller.dispatch(Intent::Exchange { cost: 50 }).unwrap();
    controller.dispatch(Intent::StartRelax).unwrap();
    assert_eq!(controller.snapshot().relax_remaining_secs, Some(300));

    let events = controller.run(&mut ManualClock::new(u64::MAX)).unwrap();
    assert!(matches!(
        events.as_slice(),
        [Event::RelaxEnded { expired: true, .. }]
    ));
    let snap = controller.snapshot();
    assert_eq!(snap.relax_remaining_secs, None);
    assert_eq!(snap.ledger, Ledger::new(30, 5));
}

#[test]
fn test_custom_rules_are_honoured() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let rules = Rules {
        finish_threshold_pct: 50,
        relax_cap_min: 10,
        ..Rules::default()
    };
    let mut controller =
        Controller::new(AppState::new(rules, today).with_ledger(Ledger::new(0, 45)));

    controller.dispatch(Intent::StartRelax).unwrap();
    assert_eq!(controller.snapshot().relax_remaining_secs, Some(600));
    controller.dispatch(Intent::StopRelax).unwrap();

    let id = add_mission(&mut controller, 10, Difficulty::Easy);
    controller.dispatch(Intent::Start(id)).unwrap();
    controller.run(&mut ManualClock::new(5 * 60)).unwrap();
    controller.dispatch(Intent::Finish).unwrap();
    assert_eq!(controller.snapshot().ledger.total_points, 20);
}
