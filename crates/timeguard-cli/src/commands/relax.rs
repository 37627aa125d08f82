use clap::Subcommand;
use timeguard_core::Intent;

use super::apply;

#[derive(Subcommand)]
pub enum RelaxAction {
    /// Start a relax break from the relax balance (capped per session)
    Start,
    /// End the current break early
    Stop,
}

pub fn run(action: RelaxAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RelaxAction::Start => apply(|c| c.dispatch(Intent::StartRelax)),
        RelaxAction::Stop => apply(|c| c.dispatch(Intent::StopRelax)),
    }
}
