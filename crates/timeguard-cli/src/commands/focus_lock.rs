use clap::Subcommand;
use serde::Serialize;
use timeguard_core::{FocusLockLevel, Intent};

use super::{apply, open_controller};

#[derive(Subcommand)]
pub enum FocusLockAction {
    /// Show the Focus Lock setting and what it would block
    Show,
    /// Enable Focus Lock
    On,
    /// Disable Focus Lock
    Off,
    /// Set strictness: light, medium or strict
    Level {
        #[arg(value_parser = parse_level)]
        level: FocusLockLevel,
    },
}

fn parse_level(s: &str) -> Result<FocusLockLevel, String> {
    s.parse().map_err(|e: timeguard_core::ValidationError| e.to_string())
}

#[derive(Serialize)]
struct FocusLockView {
    enabled: bool,
    level: FocusLockLevel,
    description: &'static str,
    blocked: &'static [&'static str],
}

pub fn run(action: FocusLockAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FocusLockAction::Show => {
            let (_store, controller) = open_controller()?;
            let lock = controller.state().focus_lock;
            let view = FocusLockView {
                enabled: lock.enabled,
                level: lock.level,
                description: lock.level.description(),
                blocked: lock.level.blocked_categories(),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        FocusLockAction::On => apply(|c| c.dispatch(Intent::SetFocusLock(true))),
        FocusLockAction::Off => apply(|c| c.dispatch(Intent::SetFocusLock(false))),
        FocusLockAction::Level { level } => {
            apply(|c| c.dispatch(Intent::SetFocusLockLevel(level)))
        }
    }
}
