//! Persistent TTL cache for service results
//!
//! Hotel searches and generated itineraries are expensive, so results are
//! kept on disk in a fjall keyspace as postcard-encoded entries carrying
//! their own expiry time.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use rand::RngExt;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

use crate::viewport::GeoPoint;

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

/// On-disk key/value store with per-entry expiry
#[derive(Clone)]
pub struct ResultCache {
    store: Keyspace,
}

impl Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache").finish_non_exhaustive()
    }
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Cache key for the hotels around an itinerary
#[must_use]
pub fn hotels_key(itinerary_id: Option<&str>, center: GeoPoint) -> String {
    match itinerary_id {
        Some(id) => format!("hotels:{id}"),
        None => format!("hotels:{:.3}:{:.3}", center.latitude, center.longitude),
    }
}

/// Cache key for a generated itinerary
#[must_use]
pub fn itinerary_key(uuid: &str) -> String {
    format!("itinerary:{uuid}")
}

/// Spread `ttl` by ±10% so entries written together do not all expire at once
#[must_use]
pub fn jittered(ttl: Duration) -> Duration {
    let jitter: f64 = rand::rng().random_range(0.9..1.1);
    ttl.mul_f64(jitter)
}

impl ResultCache {
    /// Open (or create) the cache database in `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let items = db.keyspace("results", fjall::KeyspaceCreateOptions::default)?;
        Ok(ResultCache { store: items })
    }

    /// Stores a serializable value with a time-to-live (TTL).
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = StoredEntry { value, expires_at };
        let bytes = postcard::to_stdvec(&entry)?;

        task::spawn_blocking(move || store.insert(key, bytes)).await??;
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes)).await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry<T> = postcard::from_bytes(&bytes)?;
        if unix_now()? < entry.expires_at {
            tracing::debug!("Key found and still fresh");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("Key found but expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key)).await??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_cache() -> (ResultCache, TempDir) {
        let dir = TempDir::new().unwrap();
        (ResultCache::open(dir.path()).unwrap(), dir)
    }

    #[test]
    fn test_hotels_key() {
        assert_eq!(
            hotels_key(Some("abc-123"), GeoPoint::new(1.0, 2.0)),
            "hotels:abc-123"
        );
        assert_eq!(
            hotels_key(None, GeoPoint::new(41.890_21, 12.492_23)),
            "hotels:41.890:12.492"
        );
    }

    #[test]
    fn test_jitter_stays_within_ten_percent() {
        let ttl = Duration::from_secs(3600);
        for _ in 0..100 {
            let jittered = jittered(ttl);
            assert!(jittered >= Duration::from_secs(3240));
            assert!(jittered <= Duration::from_secs(3960));
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (cache, _dir) = temp_cache();
        cache
            .put("greeting", "hello".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        let value: Option<String> = cache.get("greeting").await.unwrap();
        assert_eq!(value.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let (cache, _dir) = temp_cache();
        cache
            .put("stale", 42_u32, Duration::from_secs(0))
            .await
            .unwrap();
        let value: Option<u32> = cache.get("stale").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_missing_and_removed_keys() {
        let (cache, _dir) = temp_cache();
        assert_eq!(cache.get::<u32>("nothing").await.unwrap(), None);
        cache.put("gone", 1_u32, Duration::from_secs(60)).await.unwrap();
        cache.remove("gone").await.unwrap();
        assert_eq!(cache.get::<u32>("gone").await.unwrap(), None);
    }
}
