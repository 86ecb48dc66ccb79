use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::{Resource, RiotApiResponse, SummonerDto};

impl RiotClient {
    /// Get summoner by PUUID
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_summoner_by_puuid(
        &self,
        region: Region,
        puuid: &str,
    ) -> RiotApiResponse<SummonerDto> {
        let path = format!(
            "/lol/summoner/v4/summoners/by-puuid/{}",
            urlencoding::encode(puuid)
        );

        self.get(region.route().platform(), &path, Resource::Summoner)
            .await
    }
}
