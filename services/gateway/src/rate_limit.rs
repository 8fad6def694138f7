use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct Bucket {
    capacity: u32,
    tokens: f64,
    refill_rate: f64,
    last_update: Instant,
}

impl Bucket {
    fn new(capacity: u32, refill_rate: f64) -> Self {
        Self {
            capacity,
            tokens: capacity as f64,
            refill_rate,
            last_update: Instant::now(),
        }
    }

    /// Take one token, going into debt if none are left.
    /// Returns how long the caller must wait for its token.
    fn reserve(&mut self, now: Instant) -> Duration {
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        // Refill tokens
        self.tokens = f64::min(
            self.capacity as f64,
            self.tokens + elapsed * self.refill_rate,
        );
        self.last_update = now;

        self.tokens -= 1.0;
        if self.tokens >= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(-self.tokens / self.refill_rate)
        }
    }
}

/// Client-side throttle for outgoing Slack API calls
///
/// One token bucket per key (a Web API method name). Callers never get
/// rejected; they are told how long to sleep so the server-side tier
/// limit is not hit.
pub struct RateLimiter {
    buckets: DashMap<String, Bucket>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    pub fn reserve(&self, key: &str, capacity: u32, refill_rate: f64) -> Duration {
        self.reserve_at(key, capacity, refill_rate, Instant::now())
    }

    fn reserve_at(&self, key: &str, capacity: u32, refill_rate: f64, now: Instant) -> Duration {
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket::new(capacity, refill_rate));
        bucket.reserve(now)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
