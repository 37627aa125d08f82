use clap::Subcommand;
use timeguard_core::{Clock, Config, Controller, Intent, SystemClock};

use super::{apply, print_outcome, today};
use crate::store::StateStore;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Pick a mission without starting it
    Select { id: String },
    /// Start the countdown for a mission
    ///
    /// The countdown only advances while `timer tick` or `timer watch` is
    /// driving it; time spent between commands is not counted.
    Start { id: String },
    /// Pause the running countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Finish the mission (needs 80% elapsed unless time ran out)
    Finish,
    /// Cancel the session; a running countdown needs --confirm
    Cancel {
        #[arg(long)]
        confirm: bool,
    },
    /// Keep going after a cancel confirmation request
    DismissCancel,
    /// Advance the countdowns by whole seconds without waiting
    Tick {
        #[arg(long, short, default_value = "1")]
        count: u64,
    },
    /// Follow the countdowns in real time, one JSON line per second
    Watch {
        /// Stop after this many seconds even if time remains
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Select { id } => apply(|c| c.dispatch(Intent::Select(id))),
        TimerAction::Start { id } => apply(|c| c.dispatch(Intent::Start(id))),
        TimerAction::Pause => apply(|c| c.dispatch(Intent::Pause)),
        TimerAction::Resume => apply(|c| c.dispatch(Intent::Resume)),
        TimerAction::Finish => apply(|c| c.dispatch(Intent::Finish)),
        TimerAction::Cancel { confirm } => {
            apply(|c| c.dispatch(Intent::Cancel { confirmed: confirm }))
        }
        TimerAction::DismissCancel => apply(|c| c.dispatch(Intent::DismissCancel)),
        TimerAction::Tick { count } => apply(|c| {
            let mut events = Vec::new();
            for _ in 0..count {
                events.extend(c.dispatch(Intent::Tick)?);
            }
            Ok(events)
        }),
        TimerAction::Watch { seconds } => watch(seconds),
        TimerAction::Status => super::status(),
    }
}

/// Tick once per wall-clock second, saving after every tick.
///
/// State is reloaded before each tick so that commands run from another
/// shell in the meantime (pause, cancel) are honored rather than
/// overwritten. Interrupting the watch loses at most the current second.
fn watch(seconds: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = StateStore::open()?;
    let mut state = store.load(&config, today())?;
    if !state.is_ticking() {
        tracing::warn!("nothing is running; watch has nothing to follow");
        return print_outcome(&[], state.snapshot());
    }

    let mut clock = match seconds {
        Some(limit) => SystemClock::new().limited(limit),
        None => SystemClock::new(),
    };
    let mut events = Vec::new();
    while clock.wait_tick() {
        let mut controller = Controller::new(store.load(&config, today())?);
        if !controller.state().is_ticking() {
            tracing::info!("countdown stopped elsewhere; leaving watch");
            state = controller.into_state();
            break;
        }
        let ticked = controller.dispatch_at(Intent::Tick, clock.now())?;
        store.save(controller.state())?;
        println!("{}", serde_json::to_string(&controller.snapshot())?);
        events.extend(ticked);
        state = controller.into_state();
        if !state.is_ticking() {
            break;
        }
    }
    print_outcome(&events, state.snapshot())
}
