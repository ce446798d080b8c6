use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::data_fetcher::cache::{
    CacheKey, CacheStats, CacheStore, Clock, SystemClock, fetch_with_fallback,
};
use crate::data_fetcher::models::{ApiGame, GameRecord, GamesResponse, TeamInfo, TeamResponse};
use crate::data_fetcher::processors::{SeasonSummary, process_games};
use crate::error::AppError;

use super::fetch_utils::fetch_json;
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_games_url, build_team_url};

/// Entry counts of both caches held by a [`StatsService`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceCacheStats {
    pub team: CacheStats,
    pub games: CacheStats,
}

struct ServiceInner {
    config: Config,
    client: Client,
    team_cache: CacheStore<TeamInfo>,
    games_cache: CacheStore<Vec<ApiGame>>,
}

/// Cached access to team info and season games for the configured team.
///
/// Create one per process and clone the handle into every task that needs
/// it; clones share the same HTTP client and caches.
#[derive(Clone)]
pub struct StatsService {
    inner: Arc<ServiceInner>,
}

impl std::fmt::Debug for StatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsService")
            .field("api_base_url", &self.inner.config.api_base_url)
            .field("team_id", &self.inner.config.team_id)
            .finish_non_exhaustive()
    }
}

impl StatsService {
    /// Builds a service from a validated configuration.
    ///
    /// # Errors
    /// * `AppError::Config` - The configuration is invalid (e.g. no API key)
    /// * `AppError::ApiFetch` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::with_client(config, client))
    }

    /// Assembles a service around an existing client without validating the configuration.
    pub fn with_client(config: Config, client: Client) -> Self {
        Self::with_clock(config, client, Arc::new(SystemClock))
    }

    /// Same as [`StatsService::with_client`] with an explicit clock for both caches.
    pub fn with_clock(config: Config, client: Client, clock: Arc<dyn Clock>) -> Self {
        let ttl = config.cache_ttl();
        Self {
            inner: Arc::new(ServiceInner {
                team_cache: CacheStore::with_clock(ttl, Arc::clone(&clock)),
                games_cache: CacheStore::with_clock(ttl, clock),
                config,
                client,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Name, city and abbreviation of the configured team.
    ///
    /// Returns `None` only when upstream fails and nothing was ever cached.
    #[instrument(skip(self))]
    pub async fn get_team_info(&self) -> Option<TeamInfo> {
        let inner = &self.inner;
        let team_id = inner.config.team_id;
        let url = build_team_url(&inner.config.api_base_url, team_id);
        let url = url.as_str();

        fetch_with_fallback(
            &inner.team_cache,
            &CacheKey::team(team_id),
            inner.config.http_timeout(),
            move || async move {
                let response: TeamResponse =
                    fetch_json(&inner.client, url, &inner.config.api_key).await?;
                TeamInfo::from_api_team(response.data, url)
            },
        )
        .await
    }

    /// The configured team's games in `season`, normalized and sorted by date.
    ///
    /// Returns an empty list only when upstream fails and nothing was ever cached.
    #[instrument(skip(self))]
    pub async fn get_team_games(&self, season: i32, per_page: u32) -> Vec<GameRecord> {
        let inner = &self.inner;
        let team_id = inner.config.team_id;
        let url = build_games_url(&inner.config.api_base_url, team_id, season, per_page);
        let url = url.as_str();

        let raw_games = fetch_with_fallback(
            &inner.games_cache,
            &CacheKey::games(team_id, season, per_page),
            inner.config.http_timeout(),
            move || async move {
                let response: GamesResponse =
                    fetch_json(&inner.client, url, &inner.config.api_key).await?;
                debug!("Upstream returned {} games", response.data.len());
                Ok(response.data)
            },
        )
        .await
        .unwrap_or_default();

        process_games(&raw_games, team_id)
    }

    /// Summary over [`StatsService::get_team_games`], `None` when there are no games.
    pub async fn get_season_summary(&self, season: i32, per_page: u32) -> Option<SeasonSummary> {
        let games = self.get_team_games(season, per_page).await;
        if games.is_empty() {
            info!("No games available for season {season}, skipping summary");
            return None;
        }
        Some(SeasonSummary::from_games(&games))
    }

    /// Gets cache statistics for monitoring purposes
    pub async fn cache_stats(&self) -> ServiceCacheStats {
        let (team, games) = tokio::join!(
            self.inner.team_cache.stats(),
            self.inner.games_cache.stats()
        );
        ServiceCacheStats { team, games }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use crate::data_fetcher::models::Location;
    use crate::testing_utils::{ManualClock, TestDataBuilder};
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_mock_config(api_base_url: String) -> Config {
        Config {
            api_base_url,
            api_key: "test-key".to_string(),
            ..Config::default()
        }
    }

    fn service_for(mock_server: &MockServer) -> (StatsService, ManualClock) {
        let clock = ManualClock::new();
        let service = StatsService::with_clock(
            create_mock_config(mock_server.uri()),
            create_test_http_client(),
            Arc::new(clock.clone()),
        );
        (service, clock)
    }

    #[test]
    fn test_new_rejects_missing_api_key() {
        let result = StatsService::new(Config::default());
        assert!(matches!(result.unwrap_err(), AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_get_team_info_success_and_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/14"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(TestDataBuilder::team_response_json(14)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let (service, _clock) = service_for(&mock_server);

        let first = service.get_team_info().await.unwrap();
        let second = service.get_team_info().await.unwrap();

        assert_eq!(first.name, "Lakers");
        assert_eq!(first.city, "Los Angeles");
        assert_eq!(first.abbreviation, "LAL");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_team_info_absent_without_history() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/14"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let (service, _clock) = service_for(&mock_server);
        assert_eq!(service.get_team_info().await, None);
    }

    #[tokio::test]
    async fn test_get_team_info_incomplete_payload_is_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/14"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": {"id": 14, "name": "Lakers"}})),
            )
            .mount(&mock_server)
            .await;

        let (service, _clock) = service_for(&mock_server);
        assert_eq!(service.get_team_info().await, None);
        assert_eq!(service.cache_stats().await.team.entries, 0);
    }

    #[tokio::test]
    async fn test_get_team_games_query_and_normalization() {
        let mock_server = MockServer::start().await;
        let body = TestDataBuilder::games_response_json(vec![
            TestDataBuilder::game_json("2024-03-01", 14, 2, 110, 100, "Final"),
            TestDataBuilder::game_json("2024-01-10", 2, 14, 100, 95, "Final"),
        ]);
        Mock::given(method("GET"))
            .and(path("/games"))
            .and(query_param("team_ids[]", "14"))
            .and(query_param("seasons[]", "2023"))
            .and(query_param("per_page", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (service, _clock) = service_for(&mock_server);
        let games = service.get_team_games(2023, 50).await;

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].date.format("%Y-%m-%d").to_string(), "2024-01-10");
        assert_eq!(games[0].location, Location::Away);
        assert_eq!(games[0].team_score, 95);
        assert!(!games[0].won);
        assert_eq!(games[1].location, Location::Home);
        assert_eq!(games[1].point_diff, 10);
    }

    #[tokio::test]
    async fn test_wrongly_typed_record_keeps_the_rest_of_the_page() {
        let mock_server = MockServer::start().await;
        let mut postponed = TestDataBuilder::game_json("2024-01-12", 2, 14, 0, 0, "Postponed");
        postponed["home_team_score"] = serde_json::json!("TBD");
        let body = TestDataBuilder::games_response_json(vec![
            TestDataBuilder::game_json("2024-01-10", 14, 2, 120, 115, "Final"),
            postponed,
        ]);
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (service, _clock) = service_for(&mock_server);
        let games = service.get_team_games(2024, 25).await;

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].team_score, 120);
        assert_eq!(games[0].opponent_score, 115);
        assert!(games[0].won);
        assert_eq!(games[0].status, "Final");

        assert_eq!(games[1].status, "Postponed");
        assert_eq!(games[1].location, Location::Away);
        assert_eq!(games[1].opponent_score, 0);
        assert_eq!(games[1].opponent_name, "Boston Celtics");
        assert_eq!(service.cache_stats().await.games.fresh, 1);
    }

    #[tokio::test]
    async fn test_get_team_games_empty_on_total_absence() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let (service, _clock) = service_for(&mock_server);
        assert!(service.get_team_games(2024, 25).await.is_empty());
        assert_eq!(service.get_season_summary(2024, 25).await, None);
    }

    #[tokio::test]
    async fn test_distinct_queries_use_distinct_cache_entries() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                TestDataBuilder::games_response_json(vec![TestDataBuilder::game_json(
                    "2024-01-10",
                    14,
                    2,
                    100,
                    90,
                    "Final",
                )]),
            ))
            .expect(3)
            .mount(&mock_server)
            .await;

        let (service, _clock) = service_for(&mock_server);
        service.get_team_games(2024, 25).await;
        service.get_team_games(2023, 25).await;
        service.get_team_games(2024, 10).await;
        // Repeats are fresh hits
        service.get_team_games(2024, 25).await;
        service.get_team_games(2023, 25).await;

        assert_eq!(service.cache_stats().await.games.entries, 3);
    }

    #[tokio::test]
    async fn test_stale_games_refreshed_after_ttl() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                TestDataBuilder::games_response_json(vec![TestDataBuilder::game_json(
                    "2024-01-10",
                    14,
                    2,
                    100,
                    90,
                    "Final",
                )]),
            ))
            .expect(2)
            .mount(&mock_server)
            .await;

        let (service, clock) = service_for(&mock_server);
        service.get_team_games(2024, 25).await;
        clock.advance(Duration::from_secs(299));
        service.get_team_games(2024, 25).await;
        clock.advance(Duration::from_secs(1));
        service.get_team_games(2024, 25).await;

        let stats = service.cache_stats().await.games;
        assert_eq!(stats.fresh, 1);
    }

    #[tokio::test]
    async fn test_season_summary() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                TestDataBuilder::games_response_json(vec![
                    TestDataBuilder::game_json("2024-01-10", 14, 2, 120, 115, "Final"),
                    TestDataBuilder::game_json("2024-01-12", 2, 14, 110, 100, "Final"),
                ]),
            ))
            .mount(&mock_server)
            .await;

        let (service, _clock) = service_for(&mock_server);
        let summary = service.get_season_summary(2024, 25).await.unwrap();

        assert_eq!(summary.games_played, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.home.wins, 1);
        assert_eq!(summary.away.losses, 1);
        assert_eq!(summary.point_diffs, vec![5, -10]);
    }
}
