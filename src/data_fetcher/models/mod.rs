pub mod api;
pub mod records;

pub use api::{ApiGame, ApiMeta, ApiTeam, GamesResponse, TeamResponse};
pub use records::{GameRecord, Location, TeamInfo};
