pub mod fetch_utils;
pub mod http_client;
pub mod urls;
mod core;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
#[allow(unused_imports)]
pub use http_client::*;
pub use fetch_utils::fetch_json;
// Re-export the service
pub use core::{ServiceCacheStats, StatsService};
