use clap::Subcommand;
use timeguard_core::Config;

use crate::store::StateStore;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "rewards.finish_threshold_pct", "relax.session_cap_min")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset {
        /// Also discard missions, balances and stats
        #[arg(long)]
        state: bool,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset { state } => {
            let config = Config::default();
            config.save()?;
            if state {
                let store = StateStore::open()?;
                store.reset()?;
                println!("config reset to defaults, removed {}", store.path().display());
            } else {
                println!("config reset to defaults");
            }
        }
    }
    Ok(())
}
