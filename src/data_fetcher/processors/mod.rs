pub mod normalize;
pub mod summary;

pub use normalize::{normalize_game, parse_game_date, process_games};
pub use summary::{RecordSplit, SeasonSummary};
