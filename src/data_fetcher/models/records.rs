use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::api::ApiTeam;
use crate::error::AppError;

/// Which side of the court the subject team played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Home,
    Away,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Home => write!(f, "Home"),
            Location::Away => write!(f, "Away"),
        }
    }
}

/// One game seen from the subject team's side.
///
/// Always derived from an upstream record by
/// [`normalize_game`](crate::data_fetcher::processors::normalize_game);
/// `won` and `point_diff` are never set independently of the scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: DateTime<Utc>,
    pub team_score: u32,
    pub opponent_score: u32,
    pub opponent_name: String,
    pub opponent_abbreviation: String,
    pub location: Location,
    pub won: bool,
    pub point_diff: i64,
    pub status: String,
}

/// Name, city and abbreviation of the subject team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub city: String,
    pub abbreviation: String,
}

impl TeamInfo {
    /// "City Name", e.g. "Los Angeles Lakers"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.city, self.name)
    }

    /// Builds team info from the upstream team object.
    ///
    /// Unlike game records, a team without name, city or abbreviation is
    /// rejected so the cache keeps serving the last complete value.
    pub fn from_api_team(team: ApiTeam, url: &str) -> Result<Self, AppError> {
        let missing = |field: &str| {
            AppError::api_unexpected_structure(format!("team field '{field}' is missing"), url)
        };
        Ok(TeamInfo {
            name: team.name.ok_or_else(|| missing("name"))?,
            city: team.city.ok_or_else(|| missing("city"))?,
            abbreviation: team.abbreviation.ok_or_else(|| missing("abbreviation"))?,
        })
    }
}
