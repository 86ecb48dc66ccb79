//! Turns the account → summoner → league lookup chain into one committed
//! profile update.

use tracing::{info, instrument, warn};

use crate::db::{NewProfile, ProfileStore, SummonerProfile};
use crate::error::AppError;
use crate::riot::{Region, RiotApi, RiotApiError};

pub struct ProfileSynchronizer<A, S> {
    api: A,
    store: S,
}

impl<A: RiotApi, S: ProfileStore> ProfileSynchronizer<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the player's current ranked state and merge it into the profile
    /// stored for `discord_id`, creating the profile on first success.
    ///
    /// The lookups run strictly in order since each needs the previous
    /// result. Any failure aborts before the store is touched.
    #[instrument(
        skip(self, game_name, tag_line),
        fields(riot_id = %format!("{game_name}#{tag_line}"))
    )]
    pub async fn synchronize(
        &self,
        discord_id: &str,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> Result<SummonerProfile, AppError> {
        let not_found = |e: RiotApiError| match e {
            RiotApiError::NotFound { .. } => AppError::SummonerNotFound {
                game_name: game_name.to_string(),
                tag_line: tag_line.to_string(),
            },
            e => e.into(),
        };

        let account = self
            .api
            .resolve_account(game_name, tag_line, region)
            .await
            .map_err(not_found)?;
        let summoner = self
            .api
            .resolve_summoner(&account.puuid, region)
            .await
            .map_err(not_found)?;
        let entries = self
            .api
            .fetch_league_entries(&summoner.id, region)
            .await?;

        let summoner_name = account.game_name.unwrap_or_else(|| game_name.to_string());
        let tagline = account.tag_line.unwrap_or_else(|| tag_line.to_string());

        let defaults = NewProfile {
            summoner_name: summoner_name.clone(),
            tagline: tagline.clone(),
            puuid: account.puuid.clone(),
            summoner_id: summoner.id.clone(),
            server_region: region,
            profile_icon_id: summoner.profile_icon_id,
            summoner_level: summoner.summoner_level,
        };

        let fresh_puuid = account.puuid;
        let profile = self
            .store
            .atomic_update(discord_id, &defaults, move |profile| {
                if profile.puuid != fresh_puuid {
                    warn!(
                        stored = %profile.puuid,
                        fresh = %fresh_puuid,
                        "🔁 ⚠️ Riot account differs from the stored anchor, keeping the stored puuid"
                    );
                }

                profile.apply_league_entries(&entries);

                profile.summoner_id = summoner.id;
                profile.summoner_name = summoner_name;
                profile.tagline = tagline;
                profile.server_region = region.code().to_string();
                profile.profile_icon_id = summoner.profile_icon_id;
                profile.summoner_level = summoner.summoner_level;
            })
            .await?;

        info!(
            solo = %profile.solo.tier,
            flex = %profile.flex.tier,
            "🔁 Profile synchronized"
        );

        Ok(profile)
    }

    /// Synchronize again using the identity already stored for `discord_id`.
    ///
    /// On failure the stored profile is untouched, so callers can fall back to
    /// it with [`ProfileStore::get`].
    pub async fn resync(&self, discord_id: &str) -> Result<SummonerProfile, AppError> {
        let profile = self
            .store
            .get(discord_id)
            .await?
            .ok_or_else(|| AppError::ProfileNotFound(discord_id.to_string()))?;
        let region = profile.region()?;

        self.synchronize(discord_id, &profile.summoner_name, &profile.tagline, region)
            .await
    }
}
