//! Core error types for timeguard-core.
//!
//! Every lifecycle, ledger and countdown operation reports failure through
//! [`CoreError`]. All variants are local, recoverable conditions: a failed
//! intent leaves the application state untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timeguard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A countdown was requested with a zero duration.
    #[error("Invalid duration: a session needs at least one second")]
    InvalidDuration,

    /// Finish attempted below the early-finish floor while time remains.
    #[error("Finish not eligible: {progress_pct:.0}% elapsed, at least {threshold_pct}% required")]
    FinishNotEligible { progress_pct: f64, threshold_pct: u8 },

    /// Exchange attempted with a balance lower than the tier cost.
    #[error("Insufficient points: balance {balance}, cost {cost}")]
    InsufficientPoints { balance: u64, cost: u64 },

    /// Pause/resume/finish/cancel with no session to act on.
    #[error("No active session")]
    NoActiveSession,

    /// A second session was requested while one is still active.
    #[error("A session is already active")]
    SessionAlreadyActive,

    #[error("Mission not found: {0}")]
    MissionNotFound(String),

    /// No exchange tier is configured for this cost.
    #[error("No exchange tier costs {0} points")]
    UnknownExchangeTier(u64),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl CoreError {
    /// Stable machine-readable code, used by the CLI's JSON error output.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidDuration => "invalid_duration",
            CoreError::FinishNotEligible { .. } => "finish_not_eligible",
            CoreError::InsufficientPoints { .. } => "insufficient_points",
            CoreError::NoActiveSession => "no_active_session",
            CoreError::SessionAlreadyActive => "session_already_active",
            CoreError::MissionNotFound(_) => "mission_not_found",
            CoreError::UnknownExchangeTier(_) => "unknown_exchange_tier",
            CoreError::Validation(_) => "validation",
            CoreError::Config(_) => "config",
            CoreError::Io(_) => "io",
            CoreError::Json(_) => "json",
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
