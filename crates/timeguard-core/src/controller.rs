//! Dispatch front for the lifecycle reducer.
//!
//! The controller owns the [`AppState`], routes intents through
//! [`reduce_at`], and pushes a fresh [`Snapshot`] to every subscriber after
//! each successful intent.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::events::Event;
use crate::lifecycle::{reduce_at, AppState, Intent, Snapshot};
use crate::timer::Clock;

type Listener = Box<dyn FnMut(&Snapshot, &[Event])>;

pub struct Controller {
    state: AppState,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Controller {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Register a listener called with the snapshot and the events of every
    /// successful intent. Ticks that change nothing visible still notify.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Snapshot, &[Event]) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Apply one intent.
    ///
    /// # Errors
    ///
    /// Propagates the reducer's rejection; listeners are not notified.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Vec<Event>> {
        self.dispatch_at(intent, Utc::now())
    }

    /// Apply one intent with events stamped at `at`.
    ///
    /// # Errors
    ///
    /// See [`Controller::dispatch`].
    pub fn dispatch_at(&mut self, intent: Intent, at: DateTime<Utc>) -> Result<Vec<Event>> {
        let events = reduce_at(&mut self.state, intent, at)?;
        if !self.listeners.is_empty() {
            let snapshot = self.state.snapshot();
            for listener in &mut self.listeners {
                listener(&snapshot, &events);
            }
        }
        Ok(events)
    }

    /// Feed ticks from `clock` until nothing is ticking or the clock runs
    /// dry. Returns every event produced along the way.
    pub fn run<C: Clock>(&mut self, clock: &mut C) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        while self.state.is_ticking() && clock.wait_tick() {
            events.extend(self.dispatch_at(Intent::Tick, clock.now())?);
        }
        tracing::debug!(events = events.len(), "clock loop finished");
        Ok(events)
    }
}
