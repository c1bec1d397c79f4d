use thiserror::Error;

/// Failure taxonomy shared by the core and the service layer.
///
/// Every operation surfaces one of these kinds; the HTTP layer maps
/// kinds to status codes and never swallows an error silently.
#[derive(Debug, Error)]
pub enum GameError {
    /// Bad input shape or range; the caller must correct and retry.
    #[error("{0}")]
    Validation(String),
    /// Referenced key or user does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Operation is not valid for the current game or level status.
    #[error("{0}")]
    InvalidState(String),
    /// A move was attempted on a finished game.
    #[error("game is already over")]
    GameOver,
    /// Repeated or malformed guess; pick a different guess.
    #[error("{0}")]
    InvalidGuess(String),
    /// The word pool has zero entries; signals misconfiguration.
    #[error("no words available in the word bank")]
    EmptyPool,
    /// Infrastructure failure (storage, serialization).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GameError {
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::Validation(_) => "validation",
            GameError::NotFound(_) => "not_found",
            GameError::InvalidState(_) => "invalid_state",
            GameError::GameOver => "game_over",
            GameError::InvalidGuess(_) => "invalid_guess",
            GameError::EmptyPool => "empty_pool",
            GameError::Internal(_) => "internal",
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        GameError::NotFound(what.into())
    }
}
