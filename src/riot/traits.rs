use async_trait::async_trait;

use super::client::RiotClient;
use super::region::Region;
use super::types::{AccountDto, LeagueEntryDto, RiotApiResponse, SummonerDto};

/// The three lookups a profile synchronization chains together.
#[async_trait]
pub trait RiotApi: Send + Sync {
    async fn resolve_account(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> RiotApiResponse<AccountDto>;

    async fn resolve_summoner(&self, puuid: &str, region: Region) -> RiotApiResponse<SummonerDto>;

    async fn fetch_league_entries(
        &self,
        summoner_id: &str,
        region: Region,
    ) -> RiotApiResponse<Vec<LeagueEntryDto>>;
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn resolve_account(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> RiotApiResponse<AccountDto> {
        self.get_account_by_riot_id(region, game_name, tag_line)
            .await
    }

    async fn resolve_summoner(&self, puuid: &str, region: Region) -> RiotApiResponse<SummonerDto> {
        self.get_summoner_by_puuid(region, puuid).await
    }

    async fn fetch_league_entries(
        &self,
        summoner_id: &str,
        region: Region,
    ) -> RiotApiResponse<Vec<LeagueEntryDto>> {
        self.get_league_entries_by_summoner(region, summoner_id)
            .await
    }
}
