//! In-Memory Rate Limiter
//!
//! Fixed-window counters keyed by identity, kept in process memory.

use crate::domain::ports::RateLimiter;
use crate::error::ChallengeResult;
use chrono::Utc;
use platform::rate_limit::RateLimitConfig;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy)]
struct Window {
    start_ms: i64,
    count: u32,
}

#[derive(Debug, Default)]
pub struct InMemoryRateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop counters whose window has closed
    pub async fn cleanup_expired(&self, config: &RateLimitConfig) -> usize {
        let current = config.window_start(Utc::now().timestamp_millis());
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, window| window.start_ms >= current);
        before - windows.len()
    }

    async fn check_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> bool {
        let start_ms = config.window_start(now_ms);
        let mut windows = self.windows.lock().await;

        let window = windows
            .entry(key.to_owned())
            .or_insert(Window { start_ms, count: 0 });
        if window.start_ms != start_ms {
            *window = Window { start_ms, count: 0 };
        }
        window.count = window.count.saturating_add(1);

        let allowed = window.count <= config.max_requests;
        if !allowed {
            tracing::warn!(
                count = window.count,
                max = config.max_requests,
                "Rate limit exceeded"
            );
        }
        allowed
    }
}

impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str, config: &RateLimitConfig) -> ChallengeResult<bool> {
        Ok(self
            .check_at(key, config, Utc::now().timestamp_millis())
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allows_up_to_max_per_window() {
        let limiter = InMemoryRateLimiter::new();
        let config = RateLimitConfig::new(2, 60);

        assert!(limiter.check_at("a@example.com", &config, 1_000).await);
        assert!(limiter.check_at("a@example.com", &config, 2_000).await);
        assert!(!limiter.check_at("a@example.com", &config, 3_000).await);

        // Other keys have their own budget
        assert!(limiter.check_at("b@example.com", &config, 3_000).await);
    }

    #[tokio::test]
    async fn test_next_window_resets_count() {
        let limiter = InMemoryRateLimiter::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(limiter.check_at("a@example.com", &config, 59_000).await);
        assert!(!limiter.check_at("a@example.com", &config, 59_500).await);
        assert!(limiter.check_at("a@example.com", &config, 60_000).await);
    }

    #[tokio::test]
    async fn test_cleanup_drops_closed_windows() {
        let limiter = InMemoryRateLimiter::new();
        let config = RateLimitConfig::new(1, 3600);

        // Epoch-era window is long closed
        limiter.check_at("old@example.com", &config, 0).await;
        limiter
            .check("new@example.com", &config)
            .await
            .unwrap();

        assert_eq!(limiter.cleanup_expired(&config).await, 1);
    }
}
