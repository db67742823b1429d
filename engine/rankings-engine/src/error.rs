//! Error types for the rankings engine

use player_registry::Position;
use thiserror::Error;

/// Result type for rankings engine operations
pub type Result<T> = std::result::Result<T, RankingError>;

/// Errors that abort a ranking run
///
/// Data-quality and matching problems are not errors; they are reported as
/// warnings alongside a successful result.
#[derive(Error, Debug)]
pub enum RankingError {
    #[error("Invalid team count: {0} (must be at least 1)")]
    InvalidTeamCount(u32),

    #[error("Position {position} has {players} players in the pool but zero starters configured")]
    NoStarters { position: Position, players: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown platform preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown baseline method: {0}")]
    UnknownBaseline(String),

    #[error("Unknown scoring format: {0}")]
    UnknownScoring(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RankingError {
    /// Whether this is a configuration problem that makes baselines undefined
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RankingError::InvalidTeamCount(_)
                | RankingError::NoStarters { .. }
                | RankingError::Config(_)
                | RankingError::UnknownPreset(_)
                | RankingError::UnknownBaseline(_)
                | RankingError::UnknownScoring(_)
                | RankingError::ConfigFile(_)
        )
    }
}
