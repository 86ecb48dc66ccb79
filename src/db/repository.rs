use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::models::{NewProfile, SummonerProfile};
use crate::error::AppError;

const PROFILE_COLUMN_NAMES: [&str; 25] = [
    "id",
    "discord_id",
    "summoner_name",
    "tagline",
    "puuid",
    "summoner_id",
    "server_region",
    "profile_icon_id",
    "summoner_level",
    "current_solo_tier",
    "current_solo_division",
    "current_solo_lp",
    "solo_wins",
    "solo_losses",
    "solo_league_id",
    "highest_achieved_tier_solo",
    "current_flex_tier",
    "current_flex_division",
    "current_flex_lp",
    "flex_wins",
    "flex_losses",
    "flex_league_id",
    "highest_achieved_tier_flex",
    "last_check_timestamp",
    "is_active",
];

fn profile_columns() -> String {
    PROFILE_COLUMN_NAMES.join(", ")
}

/// Persistence of summoner profiles, keyed by discord id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, discord_id: &str) -> Result<Option<SummonerProfile>, AppError>;

    /// Returns the stored profile, inserting `defaults` first when missing.
    /// The flag tells whether this call created it.
    async fn get_or_create(
        &self,
        discord_id: &str,
        defaults: &NewProfile,
    ) -> Result<(SummonerProfile, bool), AppError>;

    /// Load-or-create, mutate and write back as a single transaction. The
    /// mutation is visible to other readers only once committed, and nothing
    /// is written if any step fails. `last_check_timestamp` is set to the
    /// commit instant.
    async fn atomic_update<F>(
        &self,
        discord_id: &str,
        defaults: &NewProfile,
        mutate: F,
    ) -> Result<SummonerProfile, AppError>
    where
        F: FnOnce(&mut SummonerProfile) + Send;

    /// Turn tracking off. Returns `false` when no profile matched.
    async fn deactivate(&self, discord_id: &str) -> Result<bool, AppError>;

    async fn list_active(&self) -> Result<Vec<SummonerProfile>, AppError>;
}

#[derive(Clone, Debug)]
pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Inserts the defaults unless the profile exists. Returns whether a row was created.
async fn insert_defaults(
    conn: &mut SqliteConnection,
    discord_id: &str,
    defaults: &NewProfile,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO summoner_profiles
            (discord_id, summoner_name, tagline, puuid, summoner_id, server_region,
             profile_icon_id, summoner_level, last_check_timestamp)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(discord_id) DO NOTHING
        "#,
    )
    .bind(discord_id)
    .bind(&defaults.summoner_name)
    .bind(&defaults.tagline)
    .bind(&defaults.puuid)
    .bind(&defaults.summoner_id)
    .bind(defaults.server_region.code())
    .bind(defaults.profile_icon_id)
    .bind(defaults.summoner_level)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn fetch_profile(
    conn: &mut SqliteConnection,
    discord_id: &str,
) -> Result<Option<SummonerProfile>, AppError> {
    let columns = profile_columns();
    let profile = sqlx::query_as::<_, SummonerProfile>(&format!(
        "SELECT {columns} FROM summoner_profiles WHERE discord_id = ?"
    ))
    .bind(discord_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(profile)
}

async fn write_profile(
    conn: &mut SqliteConnection,
    profile: &SummonerProfile,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE summoner_profiles SET
            summoner_name = ?,
            tagline = ?,
            puuid = ?,
            summoner_id = ?,
            server_region = ?,
            profile_icon_id = ?,
            summoner_level = ?,
            current_solo_tier = ?,
            current_solo_division = ?,
            current_solo_lp = ?,
            solo_wins = ?,
            solo_losses = ?,
            solo_league_id = ?,
            highest_achieved_tier_solo = ?,
            current_flex_tier = ?,
            current_flex_division = ?,
            current_flex_lp = ?,
            flex_wins = ?,
            flex_losses = ?,
            flex_league_id = ?,
            highest_achieved_tier_flex = ?,
            last_check_timestamp = ?,
            is_active = ?
        WHERE discord_id = ?
        "#,
    )
    .bind(&profile.summoner_name)
    .bind(&profile.tagline)
    .bind(&profile.puuid)
    .bind(&profile.summoner_id)
    .bind(&profile.server_region)
    .bind(profile.profile_icon_id)
    .bind(profile.summoner_level)
    .bind(&profile.solo.tier)
    .bind(&profile.solo.division)
    .bind(profile.solo.league_points)
    .bind(profile.solo.wins)
    .bind(profile.solo.losses)
    .bind(&profile.solo.league_id)
    .bind(&profile.solo.highest_achieved_tier)
    .bind(&profile.flex.tier)
    .bind(&profile.flex.division)
    .bind(profile.flex.league_points)
    .bind(profile.flex.wins)
    .bind(profile.flex.losses)
    .bind(&profile.flex.league_id)
    .bind(&profile.flex.highest_achieved_tier)
    .bind(profile.last_check_timestamp)
    .bind(profile.is_active)
    .bind(&profile.discord_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn get(&self, discord_id: &str) -> Result<Option<SummonerProfile>, AppError> {
        let mut conn = self.pool.acquire().await?;
        fetch_profile(&mut conn, discord_id).await
    }

    async fn get_or_create(
        &self,
        discord_id: &str,
        defaults: &NewProfile,
    ) -> Result<(SummonerProfile, bool), AppError> {
        let mut tx = self.pool.begin().await?;

        let created = insert_defaults(&mut tx, discord_id, defaults).await?;
        let profile = fetch_profile(&mut tx, discord_id)
            .await?
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;

        tx.commit().await?;
        Ok((profile, created))
    }

    async fn atomic_update<F>(
        &self,
        discord_id: &str,
        defaults: &NewProfile,
        mutate: F,
    ) -> Result<SummonerProfile, AppError>
    where
        F: FnOnce(&mut SummonerProfile) + Send,
    {
        let mut tx = self.pool.begin().await?;

        // A write first, so SQLite hands us the write lock before we read.
        let created = insert_defaults(&mut tx, discord_id, defaults).await?;
        let mut profile = fetch_profile(&mut tx, discord_id)
            .await?
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;

        mutate(&mut profile);
        profile.last_check_timestamp = Utc::now();

        write_profile(&mut tx, &profile).await?;
        tx.commit().await?;

        debug!(discord_id, created, "🗄️ Profile committed");
        Ok(profile)
    }

    async fn deactivate(&self, discord_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE summoner_profiles SET is_active = 0 WHERE discord_id = ?")
            .bind(discord_id)
            .execute(&self.pool)
            .await?;

        let found = result.rows_affected() > 0;
        if found {
            info!(discord_id, "🗄️ Profile tracking disabled");
        }
        Ok(found)
    }

    async fn list_active(&self) -> Result<Vec<SummonerProfile>, AppError> {
        let columns = profile_columns();
        let profiles = sqlx::query_as::<_, SummonerProfile>(&format!(
            "SELECT {columns} FROM summoner_profiles WHERE is_active = 1 ORDER BY summoner_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }
}
