use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::{AccountDto, Resource, RiotApiResponse};

fn account_path(game_name: &str, tag_line: &str) -> String {
    format!(
        "/riot/account/v1/accounts/by-riot-id/{}/{}",
        urlencoding::encode(game_name),
        urlencoding::encode(tag_line)
    )
}

impl RiotClient {
    /// Get account by Riot ID (game name + tag line)
    /// Uses regional routing (americas, europe, asia)
    pub async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> RiotApiResponse<AccountDto> {
        self.get(
            region.route().routing(),
            &account_path(game_name, tag_line),
            Resource::Account,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::account_path;

    #[test]
    fn riot_id_is_percent_encoded() {
        assert_eq!(
            account_path("Le Conservateur", "3012"),
            "/riot/account/v1/accounts/by-riot-id/Le%20Conservateur/3012"
        );
        assert_eq!(
            account_path("a/b", "#1"),
            "/riot/account/v1/accounts/by-riot-id/a%2Fb/%231"
        );
    }
}
