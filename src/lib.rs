//! Basketball team season stats with a stale-tolerant response cache.
//!
//! This library fetches one team's info and season games from the balldontlie
//! API, normalizes every game from that team's point of view and keeps the
//! last good response per query so callers still get data while upstream is
//! down.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hoopstats::config::Config;
//! use hoopstats::data_fetcher::StatsService;
//! use hoopstats::error::AppError;
//! use hoopstats::report::{ReportOptions, render_report};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let season = config.season;
//!     let service = StatsService::new(config)?;
//!
//!     let team = service.get_team_info().await;
//!     let games = service.get_team_games(season, 25).await;
//!
//!     print!("{}", render_report(team.as_ref(), &games, season, ReportOptions::default()));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod report;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::StatsService;
pub use data_fetcher::cache::{CacheKey, CacheStore, FetchOutcome, fetch_with_fallback};
pub use data_fetcher::models::{GameRecord, Location, TeamInfo};
pub use data_fetcher::processors::SeasonSummary;
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
