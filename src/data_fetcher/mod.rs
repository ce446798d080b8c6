pub mod api;
pub mod cache;
pub mod models;
pub mod processors;

pub use api::StatsService;
pub use models::{GameRecord, Location, TeamInfo};
pub use processors::SeasonSummary;
