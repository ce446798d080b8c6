//! Application-wide constants and configuration defaults
//!
//! Magic numbers live here so the config layer, the HTTP client and the
//! cache agree on the same values.

/// Default upstream API base URL (balldontlie v1)
pub const DEFAULT_API_BASE_URL: &str = "https://api.balldontlie.io/v1";

/// Default timeout for a single upstream HTTP call in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 8;

/// Default subject team (Los Angeles Lakers in balldontlie)
pub const DEFAULT_TEAM_ID: u32 = 14;

/// Default season to query
pub const DEFAULT_SEASON: i32 = 2024;

/// Page size limits accepted by the upstream `per_page` parameter
pub mod page_size {
    /// Default number of games requested per query
    pub const DEFAULT: u32 = 25;

    /// Smallest accepted page size
    pub const MIN: u32 = 1;

    /// Upstream rejects anything above this
    pub const MAX: u32 = 100;
}

/// Cache TTL (Time To Live) values in seconds
pub mod cache_ttl {
    /// Freshness window shared by every cached response (5 minutes)
    pub const DEFAULT_SECONDS: u64 = 300;
}

/// Values substituted for missing upstream fields during normalization
pub mod defaults {
    /// Opponent name used when the upstream record carries none
    pub const UNKNOWN_TEAM_NAME: &str = "Unknown";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API base URL override
    pub const API_BASE_URL: &str = "HOOPSTATS_API_BASE_URL";

    /// Environment variable holding the upstream API key
    pub const API_KEY: &str = "BALLDONTLIE_API_KEY";

    /// Environment variable for subject team override
    pub const TEAM_ID: &str = "HOOPSTATS_TEAM_ID";

    /// Environment variable for season override
    pub const SEASON: &str = "HOOPSTATS_SEASON";

    /// Environment variable for page size override
    pub const PER_PAGE: &str = "HOOPSTATS_PER_PAGE";

    /// Environment variable for cache TTL override in seconds
    pub const CACHE_TTL: &str = "HOOPSTATS_CACHE_TTL";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "HOOPSTATS_HTTP_TIMEOUT";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "HOOPSTATS_LOG_FILE";
}

/// Name used for config and log directories and the default log file
pub const APP_DIR_NAME: &str = "hoopstats";

/// Default log file name
pub const LOG_FILE_NAME: &str = "hoopstats.log";
