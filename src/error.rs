//! Error types shared across the crate.
//!
//! Each concern owns a small `thiserror` enum; [`DeskError`] wraps them for
//! the binary, which reports through `color_eyre`.

use std::path::PathBuf;

use thiserror::Error;

/// Raised when a view asks for dashboard state outside the dashboard route.
///
/// There is no fallback state to read instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("dashboard state read outside of a dashboard provider")]
    MissingProvider,
    #[error("dashboard state read after the dashboard was unmounted")]
    Unmounted,
}

/// Failures from routine editing: the exercise form, set/rep inputs and
/// committing a staged exercise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutineError {
    #[error("exercise name cannot be empty")]
    EmptyName,
    #[error("an exercise named '{0}' already exists")]
    DuplicateExercise(String),
    #[error("invalid {field}: '{value}'")]
    InvalidInput { field: &'static str, value: String },
    #[error("no exercise is staged")]
    NothingStaged,
    #[error("block '{0}' not found")]
    BlockNotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("unknown dashboard tab '{0}'")]
    InvalidTab(String),
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read data file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("data file {path:?} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("data file {path:?} has more than one block with id '{block_id}'")]
    DuplicateBlockId { path: PathBuf, block_id: String },
}

/// Top-level error for the application binary.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Routine(#[from] RoutineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("could not set up logging: {0}")]
    Logging(String),
}

pub type DeskResult<T> = Result<T, DeskError>;
