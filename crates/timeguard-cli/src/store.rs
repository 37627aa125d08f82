//! JSON state file kept between CLI invocations.
//!
//! The core library holds everything in memory; this file is the CLI's
//! external collaborator that writes the plain field set of [`AppState`]
//! to `<data dir>/state.json` and reads it back.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use timeguard_core::storage::data_dir;
use timeguard_core::{AppState, Config};

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            path: data_dir()?.join("state.json"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved state, or build a fresh one from `config`.
    ///
    /// Rules are always taken from the current config, and the daily
    /// counters roll over to `today`.
    pub fn load(
        &self,
        config: &Config,
        today: NaiveDate,
    ) -> Result<AppState, Box<dyn std::error::Error>> {
        let mut state = match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str::<AppState>(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file, starting fresh");
                AppState::new(config.rules(), today)
                    .with_ledger(config.starting_ledger())
                    .with_focus_lock(config.focus_lock())
            }
            Err(e) => return Err(e.into()),
        };
        state.rules = config.rules();
        if state.stats.roll_over(today) {
            tracing::info!(date = %today, streak = state.stats.streak_days, "new day");
        }
        Ok(state)
    }

    /// Write `state` via a temp file and rename so a crash never leaves a
    /// truncated file behind.
    pub fn save(&self, state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn reset(&self) -> Result<(), Box<dyn std::error::Error>> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
