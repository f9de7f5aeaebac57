// Per-key fixed-window rate limiter (§5: "Rate limiting is per-key (tenant
// or API key) using a fixed-window counter"). Deliberately not the
// teacher's `governor`/GCRA limiter (sven-gateway's `http/auth.rs`) — a
// fixed window is what the spec names, and this keeps the same
// per-key-sharded-mutex shape without pulling in a token-bucket crate for
// an algorithm the spec doesn't ask for.
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub events_per_minute: u32,
    pub acb_builds_per_minute: u32,
}

struct Window {
    started_at_secs: u64,
    count: u32,
}

/// One counter per key (tenant id), reset every 60s from first use.
pub struct FixedWindowLimiter {
    limit_per_minute: u32,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(limit_per_minute: u32) -> Self {
        Self { limit_per_minute, windows: Mutex::new(HashMap::new()) }
    }

    /// `Ok(())` if `key` is still under quota for the current window,
    /// otherwise `Err(retry_after_secs)` — seconds until the window resets.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, now_secs())
    }

    fn check_at(&self, key: &str, now: u64) -> Result<(), u64> {
        let mut guard = self.windows.lock().expect("rate limiter lock poisoned");
        let window = guard.entry(key.to_string()).or_insert(Window { started_at_secs: now, count: 0 });

        if now.saturating_sub(window.started_at_secs) >= 60 {
            window.started_at_secs = now;
            window.count = 0;
        }

        if window.count >= self.limit_per_minute {
            let retry_after = 60 - (now - window.started_at_secs);
            return Err(retry_after);
        }

        window.count += 1;
        Ok(())
    }
}

fn now_secs() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("system clock before epoch").as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_under_quota_all_succeed() {
        let limiter = FixedWindowLimiter::new(3);
        for _ in 0..3 {
            assert!(limiter.check_at("tenant-a", 1000).is_ok());
        }
    }

    #[test]
    fn the_request_over_quota_is_rejected_with_retry_after() {
        let limiter = FixedWindowLimiter::new(2);
        assert!(limiter.check_at("tenant-a", 1000).is_ok());
        assert!(limiter.check_at("tenant-a", 1000).is_ok());
        let err = limiter.check_at("tenant-a", 1000).unwrap_err();
        assert_eq!(err, 60);
    }

    #[test]
    fn a_new_window_resets_the_counter() {
        let limiter = FixedWindowLimiter::new(1);
        assert!(limiter.check_at("tenant-a", 1000).is_ok());
        assert!(limiter.check_at("tenant-a", 1000).is_err());
        assert!(limiter.check_at("tenant-a", 1061).is_ok());
    }

    #[test]
    fn keys_are_independent() {
        let limiter = FixedWindowLimiter::new(1);
        assert!(limiter.check_at("tenant-a", 1000).is_ok());
        assert!(limiter.check_at("tenant-b", 1000).is_ok());
    }
}
