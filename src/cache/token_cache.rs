use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::token::CachedToken;
use crate::helpers::time::now_i64;
use crate::observability::metrics::get_metrics;

/// Scope-keyed token cache: scope -> cached token
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the token cached for exactly this scope, if any
    pub async fn get(&self, scope: &str) -> Option<String> {
        self.inner.read().await.get(scope).map(|t| t.value.to_owned())
    }

    /// Store a token for a scope, replacing any previous entry
    pub async fn put(&self, scope: &str, token: &str, ttl_seconds: i64) {
        self.put_at(scope, token, ttl_seconds, now_i64()).await
    }

    pub async fn put_at(&self, scope: &str, token: &str, ttl_seconds: i64, time_cached: i64) {
        let size = {
            let mut map = self.inner.write().await;
            map.insert(
                scope.to_owned(),
                CachedToken::new(token.to_owned(), time_cached, ttl_seconds),
            );
            map.len()
        };
        get_metrics().await.cached_tokens.set(size as i64);
    }

    /// Evict every entry past the eviction ratio, returns how many were removed
    pub async fn sweep(&self) -> usize {
        self.sweep_at(now_i64()).await
    }

    pub async fn sweep_at(&self, now: i64) -> usize {
        // snapshot under the read lock, delete under the write lock
        let stale: Vec<String> = {
            let map = self.inner.read().await;
            map.iter()
                .filter(|(_, token)| token.is_expired_at(now))
                .map(|(scope, _)| scope.to_owned())
                .collect()
        };
        if stale.is_empty() {
            return 0;
        }

        let (removed, size) = {
            let mut map = self.inner.write().await;
            let mut removed = 0;
            for scope in &stale {
                // a put may have replaced the entry in between
                if map.get(scope).is_some_and(|t| t.is_expired_at(now)) {
                    map.remove(scope);
                    debug!("evicted token for scope '{}'", scope);
                    removed += 1;
                }
            }
            (removed, map.len())
        };

        let metrics = get_metrics().await;
        metrics.cached_tokens.set(size as i64);
        metrics.cache_evictions.inc_by(removed as u64);
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_last_put_for_scope() {
        let cache = TokenCache::new();
        assert_eq!(cache.get("api.read").await, None);

        cache.put("api.read", "first", 3600).await;
        assert_eq!(cache.get("api.read").await.as_deref(), Some("first"));

        cache.put("api.read", "second", 3600).await;
        assert_eq!(cache.get("api.read").await.as_deref(), Some("second"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn lookup_is_exact_scope_match() {
        let cache = TokenCache::new();
        cache.put("api.read api.write", "both", 3600).await;
        assert_eq!(cache.get("api.read").await, None);
        assert_eq!(cache.get("api.read api.write").await.as_deref(), Some("both"));
    }

    #[tokio::test]
    async fn sweep_respects_ratio_boundary() {
        let cache = TokenCache::new();
        let now = 10_000;
        cache.put_at("young", "a", 100, now - 98).await;
        cache.put_at("edge", "b", 100, now - 99).await;
        cache.put_at("old", "c", 100, now - 150).await;

        assert_eq!(cache.sweep_at(now).await, 2);
        assert_eq!(cache.get("young").await.as_deref(), Some("a"));
        assert_eq!(cache.get("edge").await, None);
        assert_eq!(cache.get("old").await, None);
    }

    #[tokio::test]
    async fn zero_ttl_does_not_panic_and_is_evicted() {
        let cache = TokenCache::new();
        cache.put("instant", "x", 0).await;
        assert_eq!(cache.get("instant").await.as_deref(), Some("x"));
        assert_eq!(cache.sweep().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn fresh_put_survives_sweep() {
        let cache = TokenCache::new();
        cache.put("api", "fresh", 3600).await;
        assert_eq!(cache.sweep().await, 0);
        assert_eq!(cache.get("api").await.as_deref(), Some("fresh"));
    }
}
