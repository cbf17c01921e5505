use chrono::Utc;
use tokio::time::Instant;

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

pub fn get_instant() -> Instant {
    Instant::now()
}

/// Fraction of the declared lifetime already consumed.
///
/// A non-positive TTL reports `f64::INFINITY` so such entries are always stale.
pub fn lifetime_ratio(time_cached: i64, ttl_seconds: i64, now: i64) -> f64 {
    if ttl_seconds <= 0 {
        return f64::INFINITY;
    }
    (now - time_cached) as f64 / ttl_seconds as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ttl_is_always_spent() {
        assert_eq!(lifetime_ratio(100, 0, 100), f64::INFINITY);
        assert_eq!(lifetime_ratio(100, -5, 50), f64::INFINITY);
    }

    #[test]
    fn ratio_is_age_over_ttl() {
        assert_eq!(lifetime_ratio(1_000, 100, 1_050), 0.5);
        assert_eq!(lifetime_ratio(1_000, 100, 1_000), 0.0);
    }
}
