//! TOML-based application configuration.
//!
//! Stores:
//! - Reward rules (early-finish floor)
//! - Relax session cap
//! - Exchange tiers
//! - Starting balances for a fresh state
//! - Focus Lock defaults
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::focus_lock::{FocusLockConfig, FocusLockLevel};
use crate::ledger::{default_tiers, ExchangeTier, Ledger};
use crate::lifecycle::Rules;

/// Reward configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_finish_threshold_pct")]
    pub finish_threshold_pct: u8,
}

/// Relax configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxConfig {
    #[serde(default = "default_session_cap_min")]
    pub session_cap_min: u64,
}

/// Exchange price list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_tiers")]
    pub tiers: Vec<ExchangeTier>,
}

/// Balances used when no state exists yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub starting_points: u64,
    #[serde(default)]
    pub starting_relax_min: u64,
}

/// Focus Lock defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusLockSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub level: FocusLockLevel,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub relax: RelaxConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub focus_lock: FocusLockSection,
}

// Default functions
fn default_finish_threshold_pct() -> u8 {
    80
}
fn default_session_cap_min() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            finish_threshold_pct: default_finish_threshold_pct(),
        }
    }
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            session_cap_min: default_session_cap_min(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
        }
    }
}

impl Default for FocusLockSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: FocusLockLevel::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data dir, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the data dir.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the lifecycle cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pct = self.rewards.finish_threshold_pct;
        if pct > 100 {
            return Err(ConfigError::InvalidValue {
                key: "rewards.finish_threshold_pct".into(),
                message: format!("{pct} is above 100"),
            });
        }
        if self.exchange.tiers.iter().any(|t| t.cost == 0) {
            return Err(ConfigError::InvalidValue {
                key: "exchange.tiers".into(),
                message: "a tier must cost at least one point".into(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            CoreError::from(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            finish_threshold_pct: self.rewards.finish_threshold_pct,
            relax_cap_min: self.relax.session_cap_min,
            tiers: self.exchange.tiers.clone(),
        }
    }

    pub fn starting_ledger(&self) -> Ledger {
        Ledger::new(self.ledger.starting_points, self.ledger.starting_relax_min)
    }

    pub fn focus_lock(&self) -> FocusLockConfig {
        FocusLockConfig {
            enabled: self.focus_lock.enabled,
            level: self.focus_lock.level,
        }
    }
}
