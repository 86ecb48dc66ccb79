use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Which lookup a 404 came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Account,
    Summoner,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => f.write_str("account"),
            Self::Summoner => f.write_str("summoner"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RiotApiError {
    #[error("{resource} not found")]
    NotFound { resource: Resource },

    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API key rejected")]
    AuthenticationFailed,

    #[error("Riot API is unavailable")]
    Unavailable,

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decoding raw response error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP connection pool is closed")]
    ConnectionClosed,
}

impl RiotApiError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Unavailable => true,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// A call to Riot API can either result in a success with the success type or fail with a [`RiotApiError`].
pub type RiotApiResponse<T> = Result<T, RiotApiError>;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

// ============================================================================
// Summoner-v4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner id, only meaningful to league-v4.
    pub id: String,
    pub account_id: String,
    pub puuid: String,
    pub profile_icon_id: i32,
    pub revision_date: i64,
    pub summoner_level: i64,
}

// ============================================================================
// League-v4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub league_id: String,
    pub queue_type: String,
    pub tier: String,
    /// Division within the tier (I to IV).
    pub rank: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub veteran: bool,
    pub inactive: bool,
    pub fresh_blood: bool,
    pub hot_streak: bool,
}
