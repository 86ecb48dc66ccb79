use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::{LeagueEntryDto, Resource, RiotApiResponse};

impl RiotClient {
    /// Get league entries (ranked info) for an encrypted summoner id
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_league_entries_by_summoner(
        &self,
        region: Region,
        summoner_id: &str,
    ) -> RiotApiResponse<Vec<LeagueEntryDto>> {
        let path = format!(
            "/lol/league/v4/entries/by-summoner/{}",
            urlencoding::encode(summoner_id)
        );

        self.get(region.route().platform(), &path, Resource::Summoner)
            .await
    }
}
