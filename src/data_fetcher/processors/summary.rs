use serde::Serialize;

use crate::data_fetcher::models::{GameRecord, Location};

/// Win/loss split for one side of the court
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordSplit {
    pub wins: usize,
    pub losses: usize,
}

impl RecordSplit {
    fn add(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// Aggregate numbers shown above the game list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub games_played: usize,
    pub wins: usize,
    /// Every game that is not a win, including unplayed 0-0 games
    pub losses: usize,
    pub avg_points_for: f64,
    pub avg_points_against: f64,
    pub home: RecordSplit,
    pub away: RecordSplit,
    /// Point differential per game, in the order of the input
    pub point_diffs: Vec<i64>,
}

impl SeasonSummary {
    /// Computes the summary over already normalized games.
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut home = RecordSplit::default();
        let mut away = RecordSplit::default();
        for game in games {
            match game.location {
                Location::Home => home.add(game.won),
                Location::Away => away.add(game.won),
            }
        }

        let wins = games.iter().filter(|g| g.won).count();
        let average = |total: u64| {
            if games.is_empty() {
                0.0
            } else {
                total as f64 / games.len() as f64
            }
        };

        SeasonSummary {
            games_played: games.len(),
            wins,
            losses: games.len() - wins,
            avg_points_for: average(games.iter().map(|g| u64::from(g.team_score)).sum()),
            avg_points_against: average(games.iter().map(|g| u64::from(g.opponent_score)).sum()),
            home,
            away,
            point_diffs: games.iter().map(|g| g.point_diff).collect(),
        }
    }

    /// Fraction of games won, 0.0 when nothing has been played
    pub fn win_percentage(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64
        }
    }
}
