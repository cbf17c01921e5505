use crate::helpers::time::lifetime_ratio;

/// Share of the declared lifetime after which an entry is evicted.
pub const EVICTION_RATIO: f64 = 0.99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub time_cached: i64, // UNIX TIMESTAMP
    pub expires_in: i64,  // declared TTL, seconds
}

impl CachedToken {
    pub fn new(value: String, time_cached: i64, expires_in: i64) -> Self {
        Self { value, time_cached, expires_in }
    }

    pub fn age(&self, now: i64) -> i64 {
        now - self.time_cached
    }

    /// True once 99% of the TTL has elapsed; a zero TTL is always expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        lifetime_ratio(self.time_cached, self.expires_in, now) >= EVICTION_RATIO
    }
}
