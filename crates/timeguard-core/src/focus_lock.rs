//! Focus Lock settings.
//!
//! Purely advisory: the level describes which app categories a blocker
//! *would* hold back during a mission. Nothing here gates the lifecycle.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Focus Lock strictness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusLockLevel {
    /// Gentle reminders only
    Light,
    /// Blocks most distractions with a short bypass
    Medium,
    /// Complete lockdown
    Strict,
}

impl FocusLockLevel {
    pub fn description(self) -> &'static str {
        match self {
            FocusLockLevel::Light => "Gentle reminders when you try to open distracting apps",
            FocusLockLevel::Medium => "Blocks most distracting apps with a 5-second bypass option",
            FocusLockLevel::Strict => {
                "Complete lockdown - no access to distracting apps during missions"
            }
        }
    }

    /// App categories this level claims to hold back.
    pub fn blocked_categories(self) -> &'static [&'static str] {
        match self {
            FocusLockLevel::Light => &["Social media", "Games"],
            FocusLockLevel::Medium => &["Social media", "Games", "Video streaming", "Shopping"],
            FocusLockLevel::Strict => &[
                "Social media",
                "Games",
                "Video streaming",
                "Shopping",
                "Web browsing",
            ],
        }
    }
}

impl Default for FocusLockLevel {
    fn default() -> Self {
        FocusLockLevel::Medium
    }
}

impl FromStr for FocusLockLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(FocusLockLevel::Light),
            "medium" => Ok(FocusLockLevel::Medium),
            "strict" => Ok(FocusLockLevel::Strict),
            _ => Err(ValidationError::InvalidValue {
                field: "focus_lock.level".into(),
                message: format!("unknown level '{s}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusLockConfig {
    pub enabled: bool,
    pub level: FocusLockLevel,
}

impl Default for FocusLockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: FocusLockLevel::default(),
        }
    }
}
