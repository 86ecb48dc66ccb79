use std::{fmt, sync::Arc};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use crate::config::Config;

use super::pool::HttpPool;
use super::rate_limit::{self, DualWindowLimiter, RetryPolicy};
use super::types::{Resource, RiotApiError, RiotApiResponse};

const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// Where requests for a given host are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBase {
    /// `https://{host}.api.riotgames.com`
    Riot,
    /// `{base}/{host}`, for a local proxy or a test server.
    Proxy(String),
}

impl ApiBase {
    pub fn url(&self, host: &str, path: &str) -> String {
        match self {
            Self::Riot => format!("https://{host}.api.riotgames.com{path}"),
            Self::Proxy(base) => format!("{}/{host}{path}", base.trim_end_matches('/')),
        }
    }
}

pub struct RiotClient {
    pool: HttpPool,
    owns_pool: bool,
    limiter: Arc<DualWindowLimiter>,
    retry: RetryPolicy,
    base: ApiBase,
    /// Riot API Key
    key: String,
}

impl fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotClient")
            .field("pool", &self.pool)
            .field("owns_pool", &self.owns_pool)
            .field("retry", &self.retry)
            .field("base", &self.base)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl RiotClient {
    /// Client with its own private connection pool.
    pub fn new(key: String) -> Self {
        Self {
            pool: HttpPool::new(),
            owns_pool: true,
            limiter: Arc::new(DualWindowLimiter::default()),
            retry: RetryPolicy::default(),
            base: ApiBase::Riot,
            key,
        }
    }

    /// Client borrowing a pool owned by someone else.
    pub fn with_pool(key: String, pool: HttpPool) -> Self {
        Self {
            pool,
            owns_pool: false,
            ..Self::new(key)
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let limiter = DualWindowLimiter::new(
            config.riot_rate_limit_per_second,
            config.riot_rate_limit_per_two_minutes,
        );
        let base = match &config.riot_api_base_url {
            Some(url) => ApiBase::Proxy(url.clone()),
            None => ApiBase::Riot,
        };

        Self::new(config.riot_api_key.clone())
            .with_limiter(Arc::new(limiter))
            .with_base(base)
            .with_retry_policy(RetryPolicy {
                max_attempts: config.riot_max_retries.saturating_add(1),
                ..RetryPolicy::default()
            })
    }

    /// Share a limiter between clients using the same key.
    pub fn with_limiter(mut self, limiter: Arc<DualWindowLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn with_base(mut self, base: ApiBase) -> Self {
        self.base = base;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Close the connection pool if this client owns it. Returns whether the
    /// pool was closed by this call.
    pub fn close(&self) -> bool {
        if !self.owns_pool {
            debug!("🛰️ Shared connection pool left open for its owner");
            return false;
        }

        self.pool.close()
    }

    /// GET `path` on `host`, retrying on rate limits according to the policy.
    #[instrument(skip(self))]
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        host: &str,
        path: &str,
        resource: Resource,
    ) -> RiotApiResponse<T> {
        let url = self.base.url(host, path);
        let attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.send(&url, resource).await {
                Err(RiotApiError::RateLimited { retry_after }) if attempt < attempts => {
                    let delay = self.retry.delay_for(attempt, retry_after);
                    warn!(attempt, attempts, ?delay, "🛰️ ⚠️ Rate limited, backing off");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                res => return res,
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, url: &str, resource: Resource) -> RiotApiResponse<T> {
        // Ensure we do not exceed the Riot API rate limits before doing any request
        self.limiter.until_ready().await;
        trace!(url, "🛰️ Sending request");

        let res = self
            .pool
            .client()?
            .get(url)
            .header(RIOT_TOKEN_HEADER, &self.key)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => {
                let body = res.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            StatusCode::NOT_FOUND => Err(RiotApiError::NotFound { resource }),
            StatusCode::TOO_MANY_REQUESTS => Err(RiotApiError::RateLimited {
                retry_after: rate_limit::retry_after(res.headers()),
            }),
            StatusCode::FORBIDDEN => Err(RiotApiError::AuthenticationFailed),
            StatusCode::SERVICE_UNAVAILABLE => Err(RiotApiError::Unavailable),
            status => {
                let body = res.text().await.unwrap_or_default();
                Err(RiotApiError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use nonzero_ext::nonzero;
    use serde_json::json;

    use super::*;
    use crate::riot::{Region, RiotApi};

    const KEY: &str = "RGAPI-TEST";

    fn client_for(server: &MockServer) -> RiotClient {
        RiotClient::new(KEY.to_string())
            .with_base(ApiBase::Proxy(server.base_url()))
            .with_retry_policy(RetryPolicy::no_retry())
    }

    fn account_body() -> serde_json::Value {
        json!({ "puuid": "P1", "gameName": "Faker", "tagLine": "KR1" })
    }

    fn summoner_body() -> serde_json::Value {
        json!({
            "id": "S1",
            "accountId": "A1",
            "puuid": "P1",
            "profileIconId": 6,
            "revisionDate": 1_700_000_000_000_i64,
            "summonerLevel": 812
        })
    }

    #[test]
    fn base_urls() {
        assert_eq!(
            ApiBase::Riot.url("europe", "/riot/x"),
            "https://europe.api.riotgames.com/riot/x"
        );
        assert_eq!(
            ApiBase::Proxy("http://localhost:8080/".into()).url("euw1", "/lol/x"),
            "http://localhost:8080/euw1/lol/x"
        );
    }

    #[test]
    fn from_config_counts_retries_after_the_first_attempt() {
        let config = Config {
            riot_api_key: KEY.into(),
            database_url: "sqlite::memory:".into(),
            riot_api_base_url: Some("http://localhost:9000".into()),
            riot_rate_limit_per_second: nonzero!(20_u32),
            riot_rate_limit_per_two_minutes: nonzero!(100_u32),
            riot_max_retries: 3,
            default_region: Region::Euw,
        };

        let client = RiotClient::from_config(&config);

        assert_eq!(client.retry.max_attempts, 4);
        assert_eq!(
            client.base,
            ApiBase::Proxy("http://localhost:9000".into())
        );
    }

    #[test]
    fn debug_hides_the_key() {
        let client = RiotClient::new(KEY.to_string());
        assert!(!format!("{client:?}").contains(KEY));
    }

    #[tokio::test]
    async fn account_lookup_uses_routing_host() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/europe/riot/account/v1/accounts/by-riot-id/Faker/KR1")
                    .header(RIOT_TOKEN_HEADER, KEY);
                then.status(200).json_body(account_body());
            })
            .await;

        let account = client_for(&server)
            .resolve_account("Faker", "KR1", Region::Euw)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(account.puuid, "P1");
        assert_eq!(account.game_name.as_deref(), Some("Faker"));
    }

    #[tokio::test]
    async fn summoner_and_league_use_platform_host() {
        let server = MockServer::start_async().await;
        let summoner = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/euw1/lol/summoner/v4/summoners/by-puuid/P1")
                    .header(RIOT_TOKEN_HEADER, KEY);
                then.status(200).json_body(summoner_body());
            })
            .await;
        let league = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/euw1/lol/league/v4/entries/by-summoner/S1")
                    .header(RIOT_TOKEN_HEADER, KEY);
                then.status(200).json_body(json!([]));
            })
            .await;

        let client = client_for(&server);
        let dto = client.resolve_summoner("P1", Region::Euw).await.unwrap();
        let entries = client.fetch_league_entries(&dto.id, Region::Euw).await.unwrap();

        summoner.assert_async().await;
        league.assert_async().await;
        assert_eq!(dto.summoner_level, 812);
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn not_found_is_contextualised() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(404).body("{}");
            })
            .await;

        let client = client_for(&server);
        let account = client.resolve_account("Nobody", "0000", Region::Kr).await;
        let summoner = client.resolve_summoner("P404", Region::Kr).await;

        assert!(matches!(
            account,
            Err(RiotApiError::NotFound {
                resource: Resource::Account
            })
        ));
        assert!(matches!(
            summoner,
            Err(RiotApiError::NotFound {
                resource: Resource::Summoner
            })
        ));
    }

    #[tokio::test]
    async fn status_codes_map_to_taxonomy() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/kr/lol/summoner/v4/summoners/by-puuid/forbidden");
                then.status(403);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.path("/kr/lol/summoner/v4/summoners/by-puuid/down");
                then.status(503);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.path("/kr/lol/summoner/v4/summoners/by-puuid/teapot");
                then.status(418).body("short and stout");
            })
            .await;

        let client = client_for(&server);

        assert!(matches!(
            client.resolve_summoner("forbidden", Region::Kr).await,
            Err(RiotApiError::AuthenticationFailed)
        ));
        assert!(matches!(
            client.resolve_summoner("down", Region::Kr).await,
            Err(RiotApiError::Unavailable)
        ));
        match client.resolve_summoner("teapot", Region::Kr).await {
            Err(RiotApiError::Status { status, body }) => {
                assert_eq!(status, 418);
                assert_eq!(body, "short and stout");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).json_body(json!({ "puuid": "P1" }));
            })
            .await;

        let res = client_for(&server).resolve_summoner("P1", Region::Na).await;

        assert!(matches!(res, Err(RiotApiError::Decode(_))));
    }

    #[tokio::test]
    async fn rate_limit_is_retried_with_server_hint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(429).header("Retry-After", "0");
            })
            .await;

        let client = client_for(&server).with_retry_policy(RetryPolicy {
            max_attempts: 2,
            initial_backoff: Duration::from_secs(60),
            max_backoff: Duration::from_secs(60),
        });

        let res = client.resolve_account("Faker", "KR1", Region::Kr).await;

        mock.assert_hits_async(2).await;
        assert!(matches!(
            res,
            Err(RiotApiError::RateLimited {
                retry_after: Some(d)
            }) if d == Duration::ZERO
        ));
    }

    #[tokio::test]
    async fn shared_pool_survives_a_borrower_closing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).json_body(account_body());
            })
            .await;

        let pool = HttpPool::new();
        let base = ApiBase::Proxy(server.base_url());
        let first = RiotClient::with_pool(KEY.into(), pool.clone()).with_base(base.clone());
        let second = RiotClient::with_pool(KEY.into(), pool.clone()).with_base(base);

        first.resolve_account("Faker", "KR1", Region::Kr).await.unwrap();
        assert!(!first.close());
        second.resolve_account("Faker", "KR1", Region::Kr).await.unwrap();

        assert!(pool.close());
        assert!(matches!(
            second.resolve_account("Faker", "KR1", Region::Kr).await,
            Err(RiotApiError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn owner_closes_its_private_pool() {
        let client = RiotClient::new(KEY.into());
        assert!(client.close());
        assert!(!client.close());
        assert!(matches!(
            client.resolve_summoner("P1", Region::Euw).await,
            Err(RiotApiError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn request_propagates_reqwest_error() {
        let client = RiotClient::new(KEY.into())
            .with_base(ApiBase::Proxy("ht!tp://invalid-url".into()))
            .with_retry_policy(RetryPolicy::no_retry());

        let res = client.resolve_account("Faker", "KR1", Region::Kr).await;

        assert!(matches!(res, Err(RiotApiError::Transport(_))));
    }

    #[tokio::test]
    #[ignore = "API Key required"]
    async fn get_account_by_riot_id_works() {
        dotenvy::dotenv().ok();
        let key = std::env::var("RIOT_API_KEY").unwrap();
        let client = RiotClient::new(key);

        let account = client
            .resolve_account("Le Conservateur", "3012", Region::Euw)
            .await
            .unwrap();

        assert_eq!(account.tag_line, Some("3012".to_string()));
    }
}
