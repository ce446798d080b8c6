//! Turns raw upstream games into [`GameRecord`]s seen from the subject team.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::constants::defaults::UNKNOWN_TEAM_NAME;
use crate::data_fetcher::models::{ApiGame, ApiTeam, GameRecord, Location};

/// Parses an upstream game date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps and
/// bare `YYYY-MM-DD` dates. Naive values are taken as UTC.
pub fn parse_game_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn score(raw: Option<i64>) -> u32 {
    u32::try_from(raw.unwrap_or(0).max(0)).unwrap_or(u32::MAX)
}

fn opponent_name(team: Option<&ApiTeam>) -> String {
    team.and_then(|t| t.full_name.clone().or_else(|| t.name.clone()))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_TEAM_NAME.to_string())
}

/// Normalizes one upstream game from the point of view of `subject_team_id`.
///
/// Pure mapping: the subject is home exactly when the home team's id matches,
/// otherwise it is treated as the visitor. Missing scores become 0, a missing
/// opponent name becomes "Unknown", a missing status becomes empty and an
/// unparseable date becomes the Unix epoch.
pub fn normalize_game(raw: &ApiGame, subject_team_id: u32) -> GameRecord {
    let home_score = score(raw.home_team_score);
    let visitor_score = score(raw.visitor_team_score);
    let is_home = raw.home_team.as_ref().and_then(|t| t.id) == Some(subject_team_id);

    let (team_score, opponent_score, opponent, location) = if is_home {
        (home_score, visitor_score, raw.visitor_team.as_ref(), Location::Home)
    } else {
        (visitor_score, home_score, raw.home_team.as_ref(), Location::Away)
    };

    let date = match raw.date.as_deref().and_then(parse_game_date) {
        Some(date) => date,
        None => {
            warn!(
                "Game {:?} has missing or unparseable date {:?}, using epoch",
                raw.id, raw.date
            );
            DateTime::<Utc>::UNIX_EPOCH
        }
    };

    let point_diff = i64::from(team_score) - i64::from(opponent_score);

    GameRecord {
        date,
        team_score,
        opponent_score,
        opponent_name: opponent_name(opponent),
        opponent_abbreviation: opponent
            .and_then(|t| t.abbreviation.clone())
            .unwrap_or_default(),
        location,
        won: point_diff > 0,
        point_diff,
        status: raw.status.clone().unwrap_or_default(),
    }
}

/// Normalizes every game and sorts the result by date, oldest first.
pub fn process_games(raw_games: &[ApiGame], subject_team_id: u32) -> Vec<GameRecord> {
    let mut games: Vec<GameRecord> = raw_games
        .iter()
        .map(|game| normalize_game(game, subject_team_id))
        .collect();
    games.sort_by_key(|game| game.date);
    debug!(
        "Processed {} games for team {}",
        games.len(),
        subject_team_id
    );
    games
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn team(id: u32, full_name: &str, abbreviation: &str) -> ApiTeam {
        ApiTeam {
            id: Some(id),
            full_name: Some(full_name.to_string()),
            abbreviation: Some(abbreviation.to_string()),
            ..ApiTeam::default()
        }
    }

    fn game(date: &str, home: ApiTeam, visitor: ApiTeam, home_score: i64, visitor_score: i64) -> ApiGame {
        ApiGame {
            id: Some(1),
            date: Some(date.to_string()),
            status: Some("Final".to_string()),
            home_team: Some(home),
            visitor_team: Some(visitor),
            home_team_score: Some(home_score),
            visitor_team_score: Some(visitor_score),
            ..ApiGame::default()
        }
    }

    fn lakers() -> ApiTeam {
        team(14, "Los Angeles Lakers", "LAL")
    }

    fn celtics() -> ApiTeam {
        team(2, "Boston Celtics", "BOS")
    }

    #[test]
    fn test_subject_team_at_home() {
        let record = normalize_game(&game("2024-01-10", lakers(), celtics(), 100, 90), 14);

        assert_eq!(record.team_score, 100);
        assert_eq!(record.opponent_score, 90);
        assert_eq!(record.location, Location::Home);
        assert_eq!(record.opponent_name, "Boston Celtics");
        assert_eq!(record.opponent_abbreviation, "BOS");
        assert!(record.won);
        assert_eq!(record.point_diff, 10);
    }

    #[test]
    fn test_normalization_depends_on_identity_not_position() {
        let away = normalize_game(&game("2024-01-10", celtics(), lakers(), 90, 100), 14);

        assert_eq!(away.team_score, 100);
        assert_eq!(away.opponent_score, 90);
        assert_eq!(away.location, Location::Away);
        assert_eq!(away.opponent_name, "Boston Celtics");
        assert!(away.won);
        assert_eq!(away.point_diff, 10);
    }

    #[test]
    fn test_loss_and_tie_are_not_wins() {
        let loss = normalize_game(&game("2024-01-10", lakers(), celtics(), 98, 111), 14);
        assert!(!loss.won);
        assert_eq!(loss.point_diff, -13);

        // Scheduled games report 0-0
        let scheduled = normalize_game(&game("2024-04-01", lakers(), celtics(), 0, 0), 14);
        assert!(!scheduled.won);
        assert_eq!(scheduled.point_diff, 0);
    }

    #[test]
    fn test_missing_fields_get_safe_defaults() {
        let raw = ApiGame {
            id: Some(7),
            home_team: Some(lakers()),
            ..ApiGame::default()
        };
        let record = normalize_game(&raw, 14);

        assert_eq!(record.team_score, 0);
        assert_eq!(record.opponent_score, 0);
        assert_eq!(record.opponent_name, "Unknown");
        assert_eq!(record.opponent_abbreviation, "");
        assert_eq!(record.status, "");
        assert_eq!(record.date, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(record.won, record.point_diff > 0);
    }

    #[test]
    fn test_missing_home_team_means_away() {
        let raw = ApiGame {
            visitor_team: Some(lakers()),
            home_team_score: Some(101),
            visitor_team_score: Some(99),
            ..ApiGame::default()
        };
        let record = normalize_game(&raw, 14);
        assert_eq!(record.location, Location::Away);
        assert_eq!(record.team_score, 99);
        assert_eq!(record.opponent_name, "Unknown");
    }

    #[test]
    fn test_opponent_name_falls_back_to_short_name() {
        let opponent = ApiTeam {
            id: Some(10),
            name: Some("Warriors".to_string()),
            ..ApiTeam::default()
        };
        let record = normalize_game(&game("2024-01-10", lakers(), opponent, 1, 0), 14);
        assert_eq!(record.opponent_name, "Warriors");
    }

    #[test]
    fn test_negative_scores_clamp_to_zero() {
        let record = normalize_game(&game("2024-01-10", lakers(), celtics(), -5, 3), 14);
        assert_eq!(record.team_score, 0);
        assert_eq!(record.point_diff, -3);
    }

    #[test]
    fn test_parse_game_date_formats() {
        let bare = parse_game_date("2024-03-01").unwrap();
        assert_eq!((bare.year(), bare.month(), bare.day()), (2024, 3, 1));

        let zulu = parse_game_date("2024-03-01T00:00:00.000Z").unwrap();
        assert_eq!(zulu, bare);

        let offset = parse_game_date("2024-03-01T02:00:00+02:00").unwrap();
        assert_eq!(offset, bare);

        let naive = parse_game_date("2024-03-01T00:00:00").unwrap();
        assert_eq!(naive, bare);

        assert!(parse_game_date("March 1st").is_none());
        assert!(parse_game_date("").is_none());
    }

    #[test]
    fn test_process_games_sorts_by_date() {
        let raw = vec![
            game("2024-03-01", lakers(), celtics(), 110, 100),
            game("2024-01-10", celtics(), lakers(), 100, 95),
            game("2024-02-15", lakers(), celtics(), 120, 118),
        ];

        let processed = process_games(&raw, 14);
        let dates: Vec<String> = processed
            .iter()
            .map(|g| g.date.format("%Y-%m-%d").to_string())
            .collect();

        assert_eq!(dates, vec!["2024-01-10", "2024-02-15", "2024-03-01"]);
        assert!(processed.iter().all(|g| g.won == (g.point_diff > 0)));
    }

    #[test]
    fn test_process_games_empty() {
        assert!(process_games(&[], 14).is_empty());
    }
}
