//! Query result caching.

mod clock;
mod query_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use query_cache::{CacheKey, DEFAULT_TTL_SECS, QueryCache};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: std::time::Duration = std::time::Duration::from_secs(60);

    fn cache_with_clock() -> (QueryCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
        ));
        let cache = QueryCache::new().with_clock(clock.clone());
        (cache, clock)
    }

    async fn counted(counter: &AtomicUsize, value: i64) -> Result<i64, String> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test]
    async fn test_hit_within_ttl_skips_compute() {
        let (cache, clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);
        let key = CacheKey::new("finance_kpis", &("2024-01-01", "2024-01-31"));

        let first = cache
            .get_or_try_compute(key.clone(), TTL, || counted(&calls, 7))
            .await
            .unwrap();
        clock.advance(Duration::seconds(60));
        let second = cache
            .get_or_try_compute(key, TTL, || counted(&calls, 99))
            .await
            .unwrap();

        assert_eq!(first, 7);
        assert_eq!(second, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_recomputed() {
        let (cache, clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);
        let key = CacheKey::new("finance_kpis", &1);

        cache
            .get_or_try_compute(key.clone(), TTL, || counted(&calls, 1))
            .await
            .unwrap();
        clock.advance(Duration::seconds(61));
        let value = cache
            .get_or_try_compute(key, TTL, || counted(&calls, 2))
            .await
            .unwrap();

        assert_eq!(value, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_and_invalidate_force_recompute() {
        let (cache, _clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);
        let a = CacheKey::new("vendor_breakdown", &"a");
        let b = CacheKey::new("vendor_breakdown", &"b");

        for key in [&a, &b] {
            cache
                .get_or_try_compute(key.clone(), TTL, || counted(&calls, 1))
                .await
                .unwrap();
        }
        assert_eq!(cache.entry_count(), 2);

        cache.invalidate(&a);
        assert!(cache.get::<i64>(&a).is_none());
        assert_eq!(cache.get::<i64>(&b), Some(1));

        cache.clear();
        assert_eq!(cache.entry_count(), 0);
        cache
            .get_or_try_compute(b, TTL, || counted(&calls, 1))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (cache, _clock) = cache_with_clock();
        let key = CacheKey::new("spend_trend", &());

        let failed: Result<i64, String> = cache
            .get_or_try_compute(key.clone(), TTL, || async { Err("boom".to_string()) })
            .await;
        assert!(failed.is_err());
        assert!(cache.get::<i64>(&key).is_none());
    }

    #[test]
    fn test_type_mismatch_is_a_miss() {
        let (cache, _clock) = cache_with_clock();
        let key = CacheKey::new("order_backlog", &());
        cache.insert(key.clone(), "not a number".to_string(), TTL);

        assert!(cache.get::<i64>(&key).is_none());
        assert!(cache.get::<String>(&key).is_none());
    }

    #[test]
    fn test_different_as_of_gives_different_keys() {
        let a = CacheKey::new("order_backlog", &("2024-01-01", "2024-01-31", "2024-02-01"));
        let b = CacheKey::new("order_backlog", &("2024-01-01", "2024-01-31", "2024-02-02"));
        assert_ne!(a, b);
        assert_eq!(a.query(), b.query());
    }

    #[test]
    fn test_concurrent_inserts_do_not_corrupt() {
        let cache = QueryCache::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    let key = CacheKey::new("department_summary", &(i % 2));
                    cache.insert(key.clone(), i % 2, TTL);
                    cache.get::<i32>(&key)
                })
            })
            .collect();

        for handle in handles {
            let value = handle.join().unwrap();
            assert!(matches!(value, Some(0 | 1)));
        }
        assert_eq!(cache.entry_count(), 2);
    }

    #[test]
    fn test_default_ttl() {
        assert_eq!(QueryCache::new().default_ttl(), TTL);
    }
}
