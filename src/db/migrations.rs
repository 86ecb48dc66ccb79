use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS summoner_profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    discord_id TEXT UNIQUE NOT NULL,
    summoner_name TEXT NOT NULL,
    tagline TEXT NOT NULL,
    puuid TEXT NOT NULL,
    summoner_id TEXT NOT NULL,
    server_region TEXT NOT NULL,
    profile_icon_id INTEGER NOT NULL DEFAULT 0,
    summoner_level INTEGER NOT NULL DEFAULT 0,
    current_solo_tier TEXT NOT NULL DEFAULT 'UNRANKED',
    current_solo_division TEXT,
    current_solo_lp INTEGER NOT NULL DEFAULT 0,
    solo_wins INTEGER NOT NULL DEFAULT 0,
    solo_losses INTEGER NOT NULL DEFAULT 0,
    solo_league_id TEXT,
    highest_achieved_tier_solo TEXT NOT NULL DEFAULT 'UNRANKED',
    current_flex_tier TEXT NOT NULL DEFAULT 'UNRANKED',
    current_flex_division TEXT,
    current_flex_lp INTEGER NOT NULL DEFAULT 0,
    flex_wins INTEGER NOT NULL DEFAULT 0,
    flex_losses INTEGER NOT NULL DEFAULT 0,
    flex_league_id TEXT,
    highest_achieved_tier_flex TEXT NOT NULL DEFAULT 'UNRANKED',
    last_check_timestamp TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
);

CREATE INDEX IF NOT EXISTS idx_summoner_profiles_puuid ON summoner_profiles(puuid);
CREATE INDEX IF NOT EXISTS idx_summoner_profiles_name ON summoner_profiles(summoner_name);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("🗄️ Database migrations completed");
    Ok(())
}
