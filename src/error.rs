use thiserror::Error;

use crate::riot::RiotApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Riot API error: {0}")]
    RiotApi(#[from] RiotApiError),

    #[error("Summoner not found: {game_name}#{tag_line}")]
    SummonerNotFound { game_name: String, tag_line: String },

    #[error("No profile registered for discord user {0}")]
    ProfileNotFound(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Whether re-running the failed operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RiotApi(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Errors caused by the deployment rather than the user's input; these
    /// should reach the operator, not the end user.
    pub fn is_operator_facing(&self) -> bool {
        matches!(
            self,
            Self::RiotApi(RiotApiError::AuthenticationFailed)
                | Self::Config(_)
                | Self::Database(_)
        )
    }
}
