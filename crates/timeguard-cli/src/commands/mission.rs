use clap::Subcommand;
use timeguard_core::{Category, Difficulty, Intent, NewMission};

use super::{apply, open_controller};

#[derive(Subcommand)]
pub enum MissionAction {
    /// Create a mission
    Add {
        /// Mission name
        name: String,
        /// Target duration in minutes
        #[arg(long, short)]
        duration: u32,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
        /// learning, work or self-improvement
        #[arg(long, default_value = "learning", value_parser = parse_category)]
        category: Category,
        /// easy, medium or hard
        #[arg(long, default_value = "medium", value_parser = parse_difficulty)]
        difficulty: Difficulty,
    },
    /// List missions as JSON
    List {
        /// Only missions not yet completed
        #[arg(long)]
        active: bool,
    },
    /// Show one mission
    Show { id: String },
    /// Delete a mission
    Delete { id: String },
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: timeguard_core::ValidationError| e.to_string())
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    s.parse().map_err(|e: timeguard_core::ValidationError| e.to_string())
}

pub fn run(action: MissionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MissionAction::Add {
            name,
            duration,
            description,
            category,
            difficulty,
        } => apply(|c| {
            c.dispatch(Intent::AddMission(NewMission {
                name,
                description,
                category,
                duration_min: duration,
                difficulty,
            }))
        }),
        MissionAction::List { active } => {
            let (_store, controller) = open_controller()?;
            let catalog = &controller.state().catalog;
            let missions: Vec<_> = if active {
                catalog.active().collect()
            } else {
                catalog.list().iter().collect()
            };
            println!("{}", serde_json::to_string_pretty(&missions)?);
            Ok(())
        }
        MissionAction::Show { id } => {
            let (_store, controller) = open_controller()?;
            let mission = controller.state().catalog.get(&id)?;
            println!("{}", serde_json::to_string_pretty(mission)?);
            Ok(())
        }
        MissionAction::Delete { id } => apply(|c| c.dispatch(Intent::DeleteMission(id))),
    }
}
