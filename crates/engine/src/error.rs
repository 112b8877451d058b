use std::path::PathBuf;

use match3_core::{GridError, ResolveError};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

/// Hard failures surfaced by the engine.
///
/// Rejected moves are not errors; they come back as
/// [`MoveOutcome::Rejected`](match3_types::MoveOutcome::Rejected).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("board is not playable: it must be filled, match-free and have a valid move")]
    Unplayable,
}

impl EngineError {
    /// Whether the board can no longer be played
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Resolve(_))
    }
}
