pub mod clock;
pub mod fallback;
pub mod store;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use fallback::{FetchOutcome, fetch_with_fallback, fetch_with_fallback_traced};
pub use store::CacheStore;
pub use types::{CacheEntry, CacheKey, CacheLookup, CacheStats};
