//! Time-boxed query result cache using Moka.
//!
//! Results are keyed by query identity plus the serialized argument tuple.
//! Expiry is checked when an entry is read; nothing sweeps in the
//! background, and entries are only evicted by size when a capacity is
//! configured.

use std::any::Any;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use moka::sync::Cache;
use serde::Serialize;
use tracing::debug;

use super::clock::{Clock, SystemClock};

/// Default time-to-live for cached results (60 seconds).
pub const DEFAULT_TTL_SECS: u64 = 60;

/// Identity of a cached result: query name plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: &'static str,
    args: String,
}

impl CacheKey {
    /// Builds a key from a query name and its argument tuple.
    ///
    /// Arguments are serialized to JSON; types that fail to serialize fall
    /// back to their `Debug` rendering.
    pub fn new<A: Serialize + Debug + ?Sized>(query: &'static str, args: &A) -> Self {
        let args = serde_json::to_string(args).unwrap_or_else(|_| format!("{args:?}"));
        Self { query, args }
    }

    /// The query name.
    #[must_use]
    pub const fn query(&self) -> &'static str {
        self.query
    }

    /// The serialized argument tuple.
    #[must_use]
    pub fn args(&self) -> &str {
        &self.args
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.query, self.args)
    }
}

#[derive(Clone)]
struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    created_at: DateTime<Utc>,
    ttl: Duration,
}

/// Process-wide cache of query results.
///
/// Cheap to clone; clones share storage. Safe for concurrent readers and
/// concurrent write-on-miss. Two callers missing the same key may both
/// compute; the last insert wins.
#[derive(Clone)]
pub struct QueryCache {
    entries: Cache<CacheKey, CacheEntry>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

impl QueryCache {
    /// Creates an unbounded cache with the default TTL and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(std::time::Duration::from_secs(DEFAULT_TTL_SECS), None)
    }

    /// Creates a cache with a custom default TTL and optional capacity.
    ///
    /// # Arguments
    ///
    /// * `default_ttl` - TTL applied when a caller does not pass one
    /// * `max_capacity` - Maximum number of entries, `None` for unbounded
    #[must_use]
    pub fn with_config(default_ttl: std::time::Duration, max_capacity: Option<u64>) -> Self {
        let mut builder = Cache::builder();
        if let Some(capacity) = max_capacity {
            builder = builder.max_capacity(capacity);
        }

        Self {
            entries: builder.build(),
            clock: Arc::new(SystemClock),
            default_ttl: to_chrono(default_ttl),
        }
    }

    /// Replaces the clock used for expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// TTL applied when a caller does not pass one.
    #[must_use]
    pub fn default_ttl(&self) -> std::time::Duration {
        self.default_ttl.to_std().unwrap_or_default()
    }

    /// Returns the live value stored under `key`.
    ///
    /// Expired entries and entries holding a different type are dropped and
    /// reported as a miss.
    #[must_use]
    pub fn get<T>(&self, key: &CacheKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.entries.get(key)?;

        let age = self.clock.now() - entry.created_at;
        if age > entry.ttl {
            debug!(query = key.query(), age_secs = age.num_seconds(), "Cache entry expired");
            self.entries.invalidate(key);
            return None;
        }

        if let Some(value) = entry.value.downcast_ref::<T>() {
            Some(value.clone())
        } else {
            debug!(query = key.query(), "Cached value has unexpected type, dropping");
            self.entries.invalidate(key);
            None
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert<T>(&self, key: CacheKey, value: T, ttl: std::time::Duration)
    where
        T: Send + Sync + 'static,
    {
        self.entries.insert(
            key,
            CacheEntry {
                value: Arc::new(value),
                created_at: self.clock.now(),
                ttl: to_chrono(ttl),
            },
        );
    }

    /// Returns the cached value for `key`, or runs `compute` and caches its result.
    ///
    /// Failed computations are returned to the caller and never cached.
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` returns.
    pub async fn get_or_try_compute<T, E, F, Fut>(
        &self,
        key: CacheKey,
        ttl: std::time::Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(&key) {
            debug!(query = key.query(), cache_hit = true, "Query served from cache");
            return Ok(hit);
        }

        debug!(query = key.query(), cache_hit = false, "Query cache miss");
        let value = compute().await?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }

    /// Drops a single entry.
    pub fn invalidate(&self, key: &CacheKey) {
        self.entries.invalidate(key);
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    /// Returns the number of entries currently held, including expired ones
    /// not yet read.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

fn to_chrono(ttl: std::time::Duration) -> Duration {
    Duration::from_std(ttl).unwrap_or(Duration::MAX)
}
