mod config;

pub use config::{
    Config, ExchangeConfig, FocusLockSection, LedgerConfig, RelaxConfig, RewardsConfig,
};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// `TIMEGUARD_HOME` wins when set. Otherwise `~/.config/timeguard[-dev]/`,
/// with `TIMEGUARD_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TIMEGUARD_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TIMEGUARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timeguard-dev")
            } else {
                base_dir.join("timeguard")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
