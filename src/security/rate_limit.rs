//! Rate Limiting Module
//!
//! In-memory sliding-window rate limiter keyed by user or client IP.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::config::SecurityConfig;

/// Rate limit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests per minute
    pub requests_per_minute: u32,
    /// Maximum requests per hour
    pub requests_per_hour: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            requests_per_hour: 1000,
        }
    }
}

/// Rate limit result
#[derive(Debug, Clone, PartialEq)]
pub enum RateLimitResult {
    /// Request is allowed, with remaining quota in the current minute
    Allowed { remaining: u32 },
    /// Request is rate limited
    Limited {
        /// Seconds until retry is allowed
        retry_after: u64,
    },
}

/// In-memory rate limiter using sliding window
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Rate limit configuration
    config: RateLimitConfig,
    /// Request history (client -> timestamps)
    request_history: Arc<RwLock<HashMap<String, Vec<DateTime<Utc>>>>>,
    /// Whether rate limiting is enabled
    enabled: bool,
}

impl RateLimiter {
    /// Create new rate limiter
    pub fn new(config: RateLimitConfig, enabled: bool) -> Self {
        Self {
            config,
            request_history: Arc::new(RwLock::new(HashMap::new())),
            enabled,
        }
    }

    /// Create from security settings
    pub fn from_settings(settings: &SecurityConfig) -> Self {
        Self::new(
            RateLimitConfig {
                requests_per_minute: settings.requests_per_minute,
                requests_per_hour: settings.requests_per_hour,
            },
            settings.rate_limit_enabled,
        )
    }

    /// Create a disabled development rate limiter
    pub fn development() -> Self {
        Self::new(RateLimitConfig::default(), false)
    }

    /// Check rate limit for a client, recording the request when allowed
    pub async fn check_rate_limit(&self, client_id: &str) -> RateLimitResult {
        if !self.enabled {
            return RateLimitResult::Allowed {
                remaining: self.config.requests_per_minute,
            };
        }

        let now = Utc::now();
        let minute_cutoff = now - Duration::minutes(1);
        let hour_cutoff = now - Duration::hours(1);

        let mut history = self.request_history.write().await;
        let entries = history.entry(client_id.to_string()).or_default();

        // Drop entries outside the largest window to bound memory.
        entries.retain(|t| *t > hour_cutoff);

        let minute_count = entries.iter().filter(|t| **t > minute_cutoff).count();

        if minute_count >= self.config.requests_per_minute as usize {
            return RateLimitResult::Limited { retry_after: 60 };
        }

        if entries.len() >= self.config.requests_per_hour as usize {
            return RateLimitResult::Limited { retry_after: 3600 };
        }

        entries.push(now);

        RateLimitResult::Allowed {
            remaining: self
                .config
                .requests_per_minute
                .saturating_sub(minute_count as u32 + 1),
        }
    }

    /// Clear all rate limit data (for testing)
    pub async fn clear_all(&self) {
        let mut history = self.request_history.write().await;
        history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_limiter_always_allows() {
        let limiter = RateLimiter::development();
        for _ in 0..500 {
            assert!(matches!(
                limiter.check_rate_limit("client").await,
                RateLimitResult::Allowed { .. }
            ));
        }
    }

    #[tokio::test]
    async fn test_limiter_blocks_after_minute_quota() {
        let limiter = RateLimiter::new(
            RateLimitConfig {
                requests_per_minute: 3,
                requests_per_hour: 100,
            },
            true,
        );

        for _ in 0..3 {
            assert!(matches!(
                limiter.check_rate_limit("client").await,
                RateLimitResult::Allowed { .. }
            ));
        }

        assert_eq!(
            limiter.check_rate_limit("client").await,
            RateLimitResult::Limited { retry_after: 60 }
        );
    }

    #[tokio::test]
    async fn test_limiter_is_per_client() {
        let limiter = RateLimiter::new(
            RateLimitConfig {
                requests_per_minute: 1,
                requests_per_hour: 100,
            },
            true,
        );

        assert!(matches!(
            limiter.check_rate_limit("alice").await,
            RateLimitResult::Allowed { .. }
        ));
        assert!(matches!(
            limiter.check_rate_limit("bob").await,
            RateLimitResult::Allowed { .. }
        ));
        assert!(matches!(
            limiter.check_rate_limit("alice").await,
            RateLimitResult::Limited { .. }
        ));
    }
}
