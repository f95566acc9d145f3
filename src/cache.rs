use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub data: T,
    pub cached_time: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_time: Utc::now(),
        }
    }

    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.cached_time
    }

    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.age(now) < CACHE_DURATION
    }
}

pub type CacheMap<T> = Arc<RwLock<HashMap<String, CacheEntry<T>>>>;
pub const CACHE_DURATION: chrono::Duration = chrono::Duration::minutes(5);

#[must_use]
pub fn new_cache_map<T>() -> CacheMap<T> {
    Arc::new(RwLock::new(HashMap::new()))
}

/// `"{m}m, {s}s"`, as shown next to cached results.
#[must_use]
pub fn describe_age(age: chrono::Duration) -> String {
    let time_since = age.num_seconds().max(0);
    format!("{}m, {}s", time_since / 60, time_since % 60)
}

/// Cached value for `key` if it is younger than `CACHE_DURATION`.
pub async fn get_fresh<T: Clone>(cache_map: &CacheMap<T>, key: &str) -> Option<T> {
    let map = cache_map.read().await;
    let entry = map.get(key)?;
    let now = Utc::now();
    if entry.is_fresh(now) {
        tracing::debug!(key, age = %describe_age(entry.age(now)), "cache hit");
        Some(entry.data.clone())
    } else {
        None
    }
}

pub async fn store<T>(cache_map: &CacheMap<T>, key: impl Into<String>, data: T) {
    let mut map = cache_map.write().await;
    let now = Utc::now();
    map.retain(|_, entry| entry.is_fresh(now));
    map.insert(key.into(), CacheEntry::new(data));
}

/// Returns the fresh cached value or computes, stores and returns a new one.
///
/// Failures are not cached.
///
/// # Errors
///
/// Will return `Err` if `fetch` fails
pub async fn get_or_try_insert_with<T, E, F, Fut>(
    cache_map: &CacheMap<T>,
    key: &str,
    fetch: F,
) -> Result<T, E>
where
    T: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(data) = get_fresh(cache_map, key).await {
        return Ok(data);
    }
    let data = fetch().await?;
    store(cache_map, key, data.clone()).await;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stale_entries_are_refetched() {
        let cache: CacheMap<u32> = new_cache_map();
        cache.write().await.insert(
            "k".to_string(),
            CacheEntry {
                data: 1,
                cached_time: Utc::now() - chrono::Duration::minutes(6),
            },
        );
        assert_eq!(get_fresh(&cache, "k").await, None);

        let fetched: Result<u32, String> =
            get_or_try_insert_with(&cache, "k", || async { Ok(2) }).await;
        assert_eq!(fetched, Ok(2));
        assert_eq!(get_fresh(&cache, "k").await, Some(2));
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache: CacheMap<u32> = new_cache_map();
        let failed: Result<u32, String> =
            get_or_try_insert_with(&cache, "k", || async { Err("down".to_string()) }).await;
        assert!(failed.is_err());
        assert!(cache.read().await.is_empty());
    }

    #[test]
    fn age_is_minutes_and_seconds() {
        assert_eq!(describe_age(chrono::Duration::seconds(125)), "2m, 5s");
    }
}
