//! Cache data structures with TTL support

use std::fmt;
use std::time::{Duration, Instant};

/// Identifies one logical upstream query.
///
/// Distinct resource types and query parameters always produce distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for the team-info lookup of `team_id`
    pub fn team(team_id: u32) -> Self {
        Self(format!("team_{team_id}"))
    }

    /// Key for one page of a team's games in a season
    pub fn games(team_id: u32, season: i32, per_page: u32) -> Self {
        Self(format!("games_{team_id}_{season}_{per_page}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored value plus the moment it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, stored_at: Instant) -> Self {
        Self { value, stored_at }
    }

    /// Age of the entry as seen at `now`
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    /// Fresh while `now - stored_at < ttl`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// Result of a freshness-aware lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup<V> {
    pub value: V,
    pub is_fresh: bool,
    pub age: Duration,
}

/// Cache information structure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub fresh: usize,
    pub stale: usize,
}
