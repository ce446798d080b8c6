//! Wire types for the balldontlie v1 API.
//!
//! Every field is optional so that one incomplete record never fails the
//! whole payload; normalization substitutes defaults later. A field of the
//! wrong type is read as missing, and a game entry that is not an object is
//! dropped, so the other records in the page still decode.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Reads a field as `None` when it is null or has an unexpected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<T>(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!("Ignoring upstream field with unexpected type: {e}");
            Ok(None)
        }
    }
}

/// Decodes each game on its own so one bad entry does not discard the page.
fn lenient_games<'de, D>(deserializer: D) -> Result<Vec<ApiGame>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<ApiGame>(value) {
            Ok(game) => Some(game),
            Err(e) => {
                warn!("Skipping upstream game at index {index}: {e}");
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiTeam {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub conference: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub division: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiGame {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub period: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub postseason: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub home_team: Option<ApiTeam>,
    #[serde(default, deserialize_with = "lenient")]
    pub visitor_team: Option<ApiTeam>,
    #[serde(default, deserialize_with = "lenient")]
    pub home_team_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub visitor_team_score: Option<i64>,
}

/// Cursor metadata returned alongside list endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMeta {
    #[serde(default)]
    pub next_cursor: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Response body of `GET /games`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamesResponse {
    #[serde(default, deserialize_with = "lenient_games")]
    pub data: Vec<ApiGame>,
    #[serde(default)]
    pub meta: Option<ApiMeta>,
}

/// Response body of `GET /teams/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResponse {
    pub data: ApiTeam,
}
