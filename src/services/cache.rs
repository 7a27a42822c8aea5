//! Cache-aside layer for read-heavy listings.
//!
//! Keys are the request path plus its query string with parameters sorted, so
//! `?page=2&q=x` and `?q=x&page=2` share an entry. Writes drop every key under
//! the affected route prefix. Storage failures never fail a request: a broken
//! cache only costs a recomputation.
//!
//! Every invalidation bumps a generation counter. A fill whose computation
//! started before the bump is dropped, so a slow reader cannot put a page it
//! built from pre-write data back after the write cleared it.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{CacheConfig, MAX_CACHE_TTL_SECONDS};
use crate::db::Store;

pub struct ResponseCache {
    store: Arc<Store>,
    enabled: bool,
    ttl: chrono::Duration,
    generation: AtomicU64,
}

impl ResponseCache {
    #[must_use]
    pub fn new(store: Arc<Store>, config: &CacheConfig) -> Self {
        let ttl =
            i64::try_from(config.ttl_seconds.min(MAX_CACHE_TTL_SECONDS)).unwrap_or_default();

        Self {
            store,
            enabled: config.enabled,
            ttl: chrono::Duration::seconds(ttl),
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the cached JSON for `key`, or runs `compute`, stores its result
    /// and returns it. Errors from `compute` are returned and never cached.
    pub async fn fetch<T, E, F, Fut>(&self, key: &str, compute: F) -> Result<Value, E>
    where
        T: Serialize,
        E: From<anyhow::Error>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.enabled {
            let value = compute().await?;
            return serde_json::to_value(value).map_err(|e| E::from(anyhow::Error::from(e)));
        }

        match self.store.cache_repo().get(key).await {
            Ok(Some(body)) => match serde_json::from_str::<Value>(&body) {
                Ok(value) => {
                    metrics::counter!("response_cache_hits_total").increment(1);
                    debug!(key, "Cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(key, error = %e, "Discarding unreadable cache entry"),
            },
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "Cache lookup failed"),
        }

        metrics::counter!("response_cache_misses_total").increment(1);

        let generation = self.generation.load(Ordering::Acquire);
        let value = serde_json::to_value(compute().await?)
            .map_err(|e| E::from(anyhow::Error::from(e)))?;

        if self.is_stale(generation) {
            debug!(key, "Skipping cache fill after invalidation");
            return Ok(value);
        }

        let repo = self.store.cache_repo();
        if let Err(e) = repo.put(key, value.to_string(), self.ttl).await {
            warn!(key, error = %e, "Failed to store cache entry");
        } else if self.is_stale(generation) {
            // An invalidation ran between the check above and the write.
            debug!(key, "Dropping cache fill raced by invalidation");
            if let Err(e) = repo.remove(key).await {
                warn!(key, error = %e, "Failed to drop stale cache entry");
            }
        }

        Ok(value)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) != generation
    }

    /// Drops every entry whose key starts with one of `prefixes`.
    pub async fn invalidate(&self, prefixes: &[String]) {
        if !self.enabled {
            return;
        }

        self.generation.fetch_add(1, Ordering::AcqRel);

        let repo = self.store.cache_repo();
        for prefix in prefixes {
            match repo.invalidate_prefix(prefix).await {
                Ok(0) => {}
                Ok(removed) => debug!(prefix = %prefix, removed, "Invalidated cache entries"),
                Err(e) => warn!(prefix = %prefix, error = %e, "Cache invalidation failed"),
            }
        }
    }

    pub async fn clear(&self) -> anyhow::Result<u64> {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.store.cache_repo().clear().await
    }
}

/// Canonical cache key: `path` plus its query pairs sorted by name then value.
#[must_use]
pub fn cache_key(path: &str, query: Option<&str>) -> String {
    let mut pairs: Vec<(String, String)> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(name), decode(value))
        })
        .collect();

    if pairs.is_empty() {
        return path.to_string();
    }

    pairs.sort();

    let query = pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{path}?{query}")
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw).map_or_else(|_| raw.clone(), |s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_sorts_query_pairs() {
        assert_eq!(
            cache_key("/api/v1/animes/", Some("q=naruto&page=2")),
            cache_key("/api/v1/animes/", Some("page=2&q=naruto"))
        );
        assert_eq!(
            cache_key("/api/v1/animes/", Some("page=2&q=naruto")),
            "/api/v1/animes/?page=2&q=naruto"
        );
    }

    #[test]
    fn key_without_query_is_the_path() {
        assert_eq!(cache_key("/api/v1/genres/", None), "/api/v1/genres/");
        assert_eq!(cache_key("/api/v1/genres/", Some("")), "/api/v1/genres/");
    }

    #[test]
    fn key_normalizes_encoding() {
        assert_eq!(
            cache_key("/p", Some("q=one+piece")),
            cache_key("/p", Some("q=one%20piece"))
        );
    }
}
