//! # Time Guardian Core Library
//!
//! This library provides the core logic behind Time Guardian: focus missions
//! run against a countdown, completed missions earn points, and points buy
//! relax time. The CLI binary is a thin presentation layer over the same
//! library.
//!
//! ## Architecture
//!
//! - **Countdown**: A tick-driven timer that requires the caller to invoke
//!   `tick()` once per second; a [`Clock`] supplies those ticks
//! - **Lifecycle**: One [`AppState`] value mutated only by the pure
//!   [`reduce`] function
//! - **Ledger**: Points and relax-time balances with all-or-nothing exchange
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Countdown`]: Single countdown state machine
//! - [`Controller`]: Dispatches intents and notifies snapshot subscribers
//! - [`MissionCatalog`]: Mission creation and lookup
//! - [`Config`]: Application configuration management

pub mod controller;
pub mod error;
pub mod events;
pub mod focus_lock;
pub mod ledger;
pub mod lifecycle;
pub mod mission;
pub mod stats;
pub mod storage;
pub mod timer;

pub use controller::Controller;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use focus_lock::{FocusLockConfig, FocusLockLevel};
pub use ledger::{ExchangeTier, Ledger, RelaxSession};
pub use lifecycle::{
    reduce, reduce_at, AppState, Intent, Lifecycle, LifecycleState, Rules, Snapshot, TimerSession,
};
pub use mission::{calculate_points, Category, Difficulty, Mission, MissionCatalog, NewMission};
pub use stats::DailyStats;
pub use storage::Config;
pub use timer::{Clock, Countdown, CountdownState, ManualClock, SystemClock, TickOutcome};
