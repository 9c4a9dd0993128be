//! Core error types for splitimer-core.
//!
//! The timer engine itself never fails: navigation misuse is logged and
//! ignored. Errors only surface at the edges: validating a workout before a
//! run, reading workout files, and loading or saving settings and the saved
//! workout library.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for splitimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Workout validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A workout file could not be read
    #[error("Cannot read workout file {path}: {source}")]
    WorkoutFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No saved workout matches the given id or name
    #[error("No saved workout named '{0}'")]
    UnknownWorkout(String),
}

/// Settings-file errors.
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

    /// Unknown dotted key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not resolve the per-user configuration directory
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Problems found in a workout before it is handed to the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A split or exercise has an empty id
    #[error("Empty id for {0}")]
    EmptyId(String),

    /// A split must be performed at least once
    #[error("Split '{split_id}' must have at least one set")]
    ZeroSets { split_id: String },

    /// Two splits share an id
    #[error("Duplicate split id '{0}'")]
    DuplicateSplit(String),

    /// Two exercises within the same split share an id
    #[error("Duplicate exercise id '{exercise_id}' in split '{split_id}'")]
    DuplicateExercise {
        split_id: String,
        exercise_id: String,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
