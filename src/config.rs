use std::env;
use std::num::NonZeroU32;

use nonzero_ext::nonzero;

use crate::error::AppError;
use crate::riot::Region;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub database_url: String,
    /// Route every request through `{base}/{host}` instead of the vendor hosts.
    pub riot_api_base_url: Option<String>,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub riot_rate_limit_per_two_minutes: NonZeroU32,
    /// Retries on `429`, on top of the first attempt.
    pub riot_max_retries: u32,
    pub default_region: Region,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        const DEFAULT_DATABASE_URL: &str = "sqlite:rankwarden.db";
        const DEFAULT_MAX_RETRIES: u32 = 3;
        let default_rate_limit_per_second: NonZeroU32 = nonzero!(20_u32);
        let default_rate_limit_per_two_minutes: NonZeroU32 = nonzero!(100_u32);

        let riot_api_key = lookup("RIOT_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let riot_api_base_url = lookup("RIOT_API_BASE_URL").filter(|v| !v.is_empty());

        let non_zero = |key: &str, default: NonZeroU32| {
            lookup(key)
                .and_then(|v| v.parse().ok())
                .and_then(NonZeroU32::new)
                .unwrap_or(default)
        };

        let riot_rate_limit_per_second =
            non_zero("RIOT_RATE_LIMIT_PER_SECOND", default_rate_limit_per_second);
        let riot_rate_limit_per_two_minutes = non_zero(
            "RIOT_RATE_LIMIT_PER_TWO_MINUTES",
            default_rate_limit_per_two_minutes,
        );

        let riot_max_retries = lookup("RIOT_MAX_RETRIES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_RETRIES);

        let default_region = match lookup("DEFAULT_REGION") {
            Some(v) => v.parse()?,
            None => Region::Euw,
        };

        Ok(Self {
            riot_api_key,
            database_url,
            riot_api_base_url,
            riot_rate_limit_per_second,
            riot_rate_limit_per_two_minutes,
            riot_max_retries,
            default_region,
        })
    }
}
