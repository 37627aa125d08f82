pub mod config;
pub mod focus_lock;
pub mod mission;
pub mod points;
pub mod relax;
pub mod timer;

use serde::Serialize;
use timeguard_core::{Config, Controller, Event, Snapshot};

use crate::store::StateStore;

/// What every state-changing command prints.
#[derive(Serialize)]
pub struct Outcome<'a> {
    pub events: &'a [Event],
    pub snapshot: Snapshot,
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Load the saved state into a controller.
pub fn open_controller() -> Result<(StateStore, Controller), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = StateStore::open()?;
    let state = store.load(&config, today())?;
    Ok((store, Controller::new(state)))
}

/// Load, apply `f`, save, and print the events with the resulting snapshot.
/// Nothing is saved when `f` fails.
pub fn apply<F>(f: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut Controller) -> timeguard_core::Result<Vec<Event>>,
{
    let (store, mut controller) = open_controller()?;
    let events = f(&mut controller)?;
    store.save(controller.state())?;
    print_outcome(&events, controller.snapshot())
}

pub fn print_outcome(events: &[Event], snapshot: Snapshot) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = Outcome { events, snapshot };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Print the current snapshot without changing anything.
pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let (_store, controller) = open_controller()?;
    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}
