use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Sliding-window attempt counter keyed by client.
///
/// Every attempt counts, successful or not.
#[derive(Debug, Clone)]
pub struct LoginRateLimiter {
    window: Duration,
    max_attempts: u32,
    buckets: Arc<DashMap<String, Vec<Instant>>>,
}

impl LoginRateLimiter {
    pub fn new(window: Duration, max_attempts: u32) -> Self {
        Self {
            window,
            max_attempts,
            buckets: Arc::new(DashMap::new()),
        }
    }

    /// Record an attempt for `key`.
    ///
    /// Returns `Err(seconds)` until the oldest attempt leaves the window when
    /// the limit is already reached. Rejected attempts are not recorded.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<(), u64> {
        let window = self.window;
        let mut entry = self.buckets.entry(key.to_owned()).or_default();
        entry.retain(|instant| now.duration_since(*instant) < window);

        if entry.len() as u32 >= self.max_attempts {
            let oldest = entry.first().copied().unwrap_or(now);
            let wait = window.saturating_sub(now.duration_since(oldest));
            return Err(wait.as_secs().max(1));
        }

        entry.push(now);
        Ok(())
    }

    /// Drop buckets with no attempts inside the window.
    pub fn purge_stale(&self) -> usize {
        let now = Instant::now();
        let window = self.window;
        let before = self.buckets.len();
        self.buckets.retain(|_, attempts| {
            attempts.retain(|instant| now.duration_since(*instant) < window);
            !attempts.is_empty()
        });
        before - self.buckets.len()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }
}
