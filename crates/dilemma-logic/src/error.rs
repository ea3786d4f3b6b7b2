//! Error type for configuration and simulation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DilemmaError {
    #[error("Round count must be at least 1")]
    InvalidRounds,

    #[error("At least one player is required")]
    EmptyLineup,

    #[error("Player id must not be blank")]
    BlankPlayerId,

    #[error("Player {0} appears more than once")]
    DuplicatePlayer(String),

    #[error("TitForTat in head-to-head mode needs exactly 2 players, got {players}")]
    TitForTatNeedsTwoPlayers { players: usize },

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid config document: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DilemmaError>;
