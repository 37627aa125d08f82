use clap::Subcommand;
use serde::Serialize;
use timeguard_core::{ExchangeTier, Intent};

use super::{apply, open_controller};

#[derive(Subcommand)]
pub enum PointsAction {
    /// Show points and relax balances
    Balance,
    /// List exchange tiers and whether each is affordable
    Tiers,
    /// Spend points on the tier with this cost
    Exchange { cost: u64 },
}

#[derive(Serialize)]
struct TierView {
    #[serde(flatten)]
    tier: ExchangeTier,
    affordable: bool,
}

pub fn run(action: PointsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PointsAction::Balance => {
            let (_store, controller) = open_controller()?;
            println!("{}", serde_json::to_string_pretty(&controller.state().ledger)?);
            Ok(())
        }
        PointsAction::Tiers => {
            let (_store, controller) = open_controller()?;
            let state = controller.state();
            let tiers: Vec<_> = state
                .rules
                .tiers
                .iter()
                .map(|&tier| TierView {
                    tier,
                    affordable: state.ledger.can_afford(tier.cost),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&tiers)?);
            Ok(())
        }
        PointsAction::Exchange { cost } => apply(|c| c.dispatch(Intent::Exchange { cost })),
    }
}
