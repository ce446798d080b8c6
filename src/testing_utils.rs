use serde_json::{Value, json};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use crate::data_fetcher::cache::Clock;
use crate::data_fetcher::models::{ApiGame, ApiTeam, GameRecord};

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can hand one clone to a cache and
/// keep another to advance it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory log sink for asserting on emitted log lines.
///
/// `install` sets a thread-local subscriber, so it only sees events from
/// the current thread (the default `#[tokio::test]` runtime).
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes every event at DEBUG and above into this capture until the guard drops
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Lines carrying `outcome=<label>`, with or without quotes around the label
    pub fn outcome_lines(&self, label: &str) -> usize {
        let plain = format!("outcome={label}");
        let quoted = format!("outcome=\"{label}\"");
        self.contents()
            .lines()
            .filter(|line| line.contains(&plain) || line.contains(&quoted))
            .count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// (id, city, name, abbreviation) of the teams used in fixtures
const FIXTURE_TEAMS: &[(u32, &str, &str, &str)] = &[
    (2, "Boston", "Celtics", "BOS"),
    (10, "Golden State", "Warriors", "GSW"),
    (14, "Los Angeles", "Lakers", "LAL"),
    (24, "Phoenix", "Suns", "PHX"),
];

/// Test utilities for creating mock upstream payloads
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates an upstream team; unknown ids get placeholder names
    pub fn create_team(id: u32) -> ApiTeam {
        let (city, name, abbreviation) = FIXTURE_TEAMS
            .iter()
            .find(|(team_id, ..)| *team_id == id)
            .map(|(_, city, name, abbreviation)| {
                (city.to_string(), name.to_string(), abbreviation.to_string())
            })
            .unwrap_or_else(|| (format!("City {id}"), format!("Team {id}"), format!("T{id}")));

        ApiTeam {
            id: Some(id),
            full_name: Some(format!("{city} {name}")),
            name: Some(name),
            city: Some(city),
            abbreviation: Some(abbreviation),
            conference: None,
            division: None,
        }
    }

    /// Creates a finished game between two fixture teams
    pub fn create_game(
        date: &str,
        home_team_id: u32,
        visitor_team_id: u32,
        home_score: i64,
        visitor_score: i64,
    ) -> ApiGame {
        ApiGame {
            id: Some(u64::from(home_team_id) * 1000 + u64::from(visitor_team_id)),
            date: Some(date.to_string()),
            season: Some(crate::constants::DEFAULT_SEASON),
            status: Some("Final".to_string()),
            period: Some(4),
            postseason: Some(false),
            home_team: Some(Self::create_team(home_team_id)),
            visitor_team: Some(Self::create_team(visitor_team_id)),
            home_team_score: Some(home_score),
            visitor_team_score: Some(visitor_score),
        }
    }

    /// Creates a scheduled game that has not started yet
    pub fn create_scheduled_game(date: &str, home_team_id: u32, visitor_team_id: u32) -> ApiGame {
        ApiGame {
            status: Some("7:30 pm ET".to_string()),
            period: Some(0),
            ..Self::create_game(date, home_team_id, visitor_team_id, 0, 0)
        }
    }

    /// JSON body of `GET /teams/{id}`
    pub fn team_response_json(id: u32) -> Value {
        json!({ "data": Self::create_team(id) })
    }

    /// One game in upstream JSON form
    pub fn game_json(
        date: &str,
        home_team_id: u32,
        visitor_team_id: u32,
        home_score: i64,
        visitor_score: i64,
        status: &str,
    ) -> Value {
        let mut game = Self::create_game(date, home_team_id, visitor_team_id, home_score, visitor_score);
        game.status = Some(status.to_string());
        json!(game)
    }

    /// JSON body of `GET /games` wrapping `games`
    pub fn games_response_json(games: Vec<Value>) -> Value {
        let per_page = games.len();
        json!({
            "data": games,
            "meta": { "next_cursor": null, "per_page": per_page }
        })
    }

    /// A run of alternating home and away games against Boston
    pub fn create_season(subject_team_id: u32, count: usize) -> Vec<ApiGame> {
        (0..count)
            .map(|i| {
                let date = format!("2024-01-{:02}", (i % 28) + 1);
                if i % 2 == 0 {
                    Self::create_game(&date, subject_team_id, 2, 110 + i as i64, 100)
                } else {
                    Self::create_game(&date, 2, subject_team_id, 105, 100 + i as i64)
                }
            })
            .collect()
    }

    /// Checks the invariants every normalized record must hold
    pub fn validate_game_record(record: &GameRecord) -> Result<(), String> {
        let expected_diff = i64::from(record.team_score) - i64::from(record.opponent_score);
        if record.point_diff != expected_diff {
            return Err(format!(
                "point_diff {} does not match scores {}-{}",
                record.point_diff, record.team_score, record.opponent_score
            ));
        }

        if record.won != (record.team_score > record.opponent_score) {
            return Err(format!(
                "won={} does not match scores {}-{}",
                record.won, record.team_score, record.opponent_score
            ));
        }

        if record.opponent_name.is_empty() {
            return Err("Opponent name cannot be empty".to_string());
        }

        Ok(())
    }
}
