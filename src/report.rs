//! Plain-text season report for the terminal.
//!
//! Rendering never fails: absent team info and an empty game list each have
//! their own message.

use crossterm::style::Stylize;
use std::fmt::Write;

use crate::data_fetcher::models::{GameRecord, Location, TeamInfo};
use crate::data_fetcher::processors::SeasonSummary;

pub const NO_GAME_DATA_MESSAGE: &str = "No game data available at this time.";
pub const NO_TEAM_DATA_MESSAGE: &str = "Could not load team data. Please check the API connection.";

/// Rendering switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Wrap results in ANSI colors
    pub color: bool,
}

fn header(team: Option<&TeamInfo>, season: i32) -> String {
    match team {
        Some(team) => format!(
            "{} ({}) - {} season",
            team.display_name(),
            team.abbreviation,
            season
        ),
        None => NO_TEAM_DATA_MESSAGE.to_string(),
    }
}

fn summary_block(summary: &SeasonSummary) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "Record: {}-{} ({:.1}%)",
        summary.wins,
        summary.losses,
        summary.win_percentage() * 100.0
    );
    let _ = writeln!(
        out,
        "Avg points: {:.1} for, {:.1} against",
        summary.avg_points_for, summary.avg_points_against
    );
    let _ = writeln!(
        out,
        "Home: {}-{}  Away: {}-{}",
        summary.home.wins, summary.home.losses, summary.away.wins, summary.away.losses
    );
    out
}

/// One line per game: date, H/A, opponent, score, result, diff and status
pub fn format_game_line(game: &GameRecord, options: ReportOptions) -> String {
    let side = match game.location {
        Location::Home => "vs",
        Location::Away => "@ ",
    };
    let result = if game.won { "W" } else { "L" };
    let result = match (options.color, game.won) {
        (false, _) => result.to_string(),
        (true, true) => result.green().bold().to_string(),
        (true, false) => result.red().bold().to_string(),
    };

    format!(
        "{}  {} {:<28} {:>3}-{:<3} {} {:>+4}  {}",
        game.date.format("%Y-%m-%d"),
        side,
        game.opponent_name,
        game.team_score,
        game.opponent_score,
        result,
        game.point_diff,
        game.status
    )
}

/// Renders the full report.
pub fn render_report(
    team: Option<&TeamInfo>,
    games: &[GameRecord],
    season: i32,
    options: ReportOptions,
) -> String {
    let mut out = String::new();
    let title = header(team, season);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));

    if games.is_empty() {
        let _ = writeln!(out, "{NO_GAME_DATA_MESSAGE}");
        return out;
    }

    out.push_str(&summary_block(&SeasonSummary::from_games(games)));
    out.push('\n');
    for game in games {
        let _ = writeln!(out, "{}", format_game_line(game, options));
    }
    out
}
