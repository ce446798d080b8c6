//! URL building utilities for API endpoints

/// Builds the team-info URL.
///
/// # Example
/// ```
/// use hoopstats::data_fetcher::api::build_team_url;
///
/// let url = build_team_url("https://api.example.com/v1", 14);
/// assert_eq!(url, "https://api.example.com/v1/teams/14");
/// ```
pub fn build_team_url(api_base_url: &str, team_id: u32) -> String {
    format!("{}/teams/{team_id}", api_base_url.trim_end_matches('/'))
}

/// Builds the URL listing one team's games in a season.
///
/// # Example
/// ```
/// use hoopstats::data_fetcher::api::build_games_url;
///
/// let url = build_games_url("https://api.example.com/v1", 14, 2024, 25);
/// assert_eq!(
///     url,
///     "https://api.example.com/v1/games?team_ids[]=14&seasons[]=2024&per_page=25"
/// );
/// ```
pub fn build_games_url(api_base_url: &str, team_id: u32, season: i32, per_page: u32) -> String {
    format!(
        "{}/games?team_ids[]={team_id}&seasons[]={season}&per_page={per_page}",
        api_base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_urls_ignore_trailing_slash() {
        assert_eq!(
            build_team_url("http://localhost:8080/", 2),
            "http://localhost:8080/teams/2"
        );
        assert_eq!(
            build_games_url("http://localhost:8080/", 2, 2023, 50),
            "http://localhost:8080/games?team_ids[]=2&seasons[]=2023&per_page=50"
        );
    }
}
