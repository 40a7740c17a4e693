use std::sync::Arc;
use std::time::Duration;

use redis::aio::ConnectionManager;
use thiserror::Error;

use crate::models::ServiceListing;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Redis key under which the joined listing snapshot is stored
const LISTINGS_KEY: &str = "directory:listings";

/// Two-tier cache for the directory snapshot
///
/// The joined listing set changes rarely compared to how often it is read,
/// so it is cached whole: moka in-process (L1) for the hot path, Redis (L2)
/// shared across instances. Every caller falls back to PostgreSQL on a miss
/// or a cache failure, so the cache is strictly an optimization.
pub struct DirectoryCache {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl DirectoryCache {
    /// Create a new directory cache
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Get the cached listing snapshot (L1 first, then L2)
    pub async fn listings(&self) -> Result<Vec<ServiceListing>, CacheError> {
        if let Some(bytes) = self.l1_cache.get(LISTINGS_KEY).await {
            tracing::trace!("L1 cache hit: {}", LISTINGS_KEY);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(LISTINGS_KEY)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("L2 cache hit: {}", LISTINGS_KEY);

            // Populate L1 for the next request on this instance
            self.l1_cache
                .insert(LISTINGS_KEY.to_string(), json.as_bytes().to_vec())
                .await;

            return Ok(serde_json::from_str(&json)?);
        }

        tracing::trace!("Cache miss: {}", LISTINGS_KEY);
        Err(CacheError::CacheMiss(LISTINGS_KEY.to_string()))
    }

    /// Store a fresh listing snapshot in both tiers
    pub async fn store_listings(&self, listings: &[ServiceListing]) -> Result<(), CacheError> {
        let json = serde_json::to_string(listings)?;

        self.l1_cache
            .insert(LISTINGS_KEY.to_string(), json.as_bytes().to_vec())
            .await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(LISTINGS_KEY)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Cached {} listings", listings.len());
        Ok(())
    }

    /// Drop the snapshot from both tiers, forcing the next request to
    /// re-read PostgreSQL
    pub async fn invalidate(&self) -> Result<(), CacheError> {
        self.l1_cache.invalidate(LISTINGS_KEY).await;
        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(LISTINGS_KEY)
            .query_async::<()>(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanyRecord, RateType, ServiceLocation, ServiceRecord};

    fn sample_listing() -> ServiceListing {
        ServiceListing {
            service: ServiceRecord {
                id: 1,
                name: "Window wash".to_string(),
                description: "Exterior windows".to_string(),
                location: ServiceLocation::OutCall,
                rate_type: RateType::ByWindow,
                price: 5.0,
                time_duration: None,
                number_of_rooms: None,
                number_of_windows: Some(12),
                image_url: "https://cdn.test/w.jpg".to_string(),
            },
            company: CompanyRecord {
                id: 1,
                business_name: Some("Shiny".to_string()),
                business_type: Some("Cleaning".to_string()),
                image_url: None,
                cover_image_url: None,
            },
            preference: None,
        }
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_snapshot_roundtrip() {
        let cache = DirectoryCache::new("redis://127.0.0.1:6379", 100, 60)
            .await
            .expect("Failed to create cache");

        let listings = vec![sample_listing()];
        cache.store_listings(&listings).await.unwrap();

        let cached = cache.listings().await.unwrap();
        assert_eq!(cached, listings);

        cache.invalidate().await.unwrap();
        assert!(cache.listings().await.is_err());
    }
}
