//! Cache-first fetching with stale fallback.
//!
//! A fresh entry answers without touching upstream. Otherwise upstream is
//! called once, bounded by a timeout and outside of any cache lock. A success
//! replaces the entry; a failure of any kind serves whatever was stored
//! last, however old, and only yields `None` when nothing was ever stored.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use super::store::CacheStore;
use super::types::CacheKey;
use crate::error::AppError;

/// How a [`fetch_with_fallback`] call was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Served from a fresh entry, upstream not called
    FreshHit,
    /// Upstream succeeded and the entry was replaced
    Refreshed,
    /// Upstream failed, an older entry was served
    StaleFallback,
    /// Upstream failed and nothing was cached
    Absent,
}

impl FetchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchOutcome::FreshHit => "fresh_hit",
            FetchOutcome::Refreshed => "refreshed",
            FetchOutcome::StaleFallback => "stale_fallback",
            FetchOutcome::Absent => "absent",
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the best available value for `key`.
///
/// Callers only see the value; the outcome is logged.
pub async fn fetch_with_fallback<V, F, Fut>(
    store: &CacheStore<V>,
    key: &CacheKey,
    timeout: Duration,
    upstream: F,
) -> Option<V>
where
    V: Clone + Send + Sync,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, AppError>>,
{
    fetch_with_fallback_traced(store, key, timeout, upstream)
        .await
        .0
}

/// Same as [`fetch_with_fallback`] but also reports how the value was obtained.
#[instrument(skip(store, upstream), fields(key = %key))]
pub async fn fetch_with_fallback_traced<V, F, Fut>(
    store: &CacheStore<V>,
    key: &CacheKey,
    timeout: Duration,
    upstream: F,
) -> (Option<V>, FetchOutcome)
where
    V: Clone + Send + Sync,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, AppError>>,
{
    let stale_age = match store.get(key).await {
        Some(hit) if hit.is_fresh => {
            info!(
                outcome = FetchOutcome::FreshHit.as_str(),
                "Cache hit for {} (age {:?})", key, hit.age
            );
            return (Some(hit.value), FetchOutcome::FreshHit);
        }
        Some(hit) => Some(hit.age),
        None => None,
    };

    let result = match tokio::time::timeout(timeout, upstream()).await {
        Ok(result) => result,
        Err(_) => Err(AppError::network_timeout(key.as_str())),
    };

    let error = match result {
        Ok(value) => {
            store.set(key.clone(), value.clone()).await;
            info!(
                outcome = FetchOutcome::Refreshed.as_str(),
                "Fetched fresh data for {} (previous entry age {:?})", key, stale_age
            );
            return (Some(value), FetchOutcome::Refreshed);
        }
        Err(error) => error,
    };

    if !error.is_upstream_failure() {
        error!("Fetch for {} failed before reaching upstream: {}", key, error);
    } else if error.is_retryable() {
        warn!("Upstream fetch failed for {}: {}", key, error);
    } else {
        error!("Upstream fetch failed for {}: {}", key, error);
    }

    match store.get_allowing_stale(key).await {
        Some(value) => {
            warn!(
                outcome = FetchOutcome::StaleFallback.as_str(),
                "Cache stale hit for {} (fallback)", key
            );
            (Some(value), FetchOutcome::StaleFallback)
        }
        None => {
            error!(
                outcome = FetchOutcome::Absent.as_str(),
                "No data available for {}", key
            );
            (None, FetchOutcome::Absent)
        }
    }
}
