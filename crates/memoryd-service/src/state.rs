use std::sync::Arc;

use memoryd_mode::ErrorRateTracker;
use memoryd_telemetry::TelemetrySink;
use sqlx::PgPool;

use crate::rate_limit::{FixedWindowLimiter, RateLimitConfig};

/// Shared state threaded through every handler via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub telemetry: TelemetrySink,
    pub error_tracker: Arc<ErrorRateTracker>,
    pub event_limiter: Arc<FixedWindowLimiter>,
    pub acb_limiter: Arc<FixedWindowLimiter>,
    pub secret_scanning_enabled: bool,
    pub default_acb_max_tokens: i32,
}

impl AppState {
    pub fn new(pool: PgPool, telemetry: TelemetrySink, rate_limit: RateLimitConfig) -> Self {
        Self::with_privacy_config(pool, telemetry, rate_limit, true)
    }

    pub fn with_privacy_config(
        pool: PgPool,
        telemetry: TelemetrySink,
        rate_limit: RateLimitConfig,
        secret_scanning_enabled: bool,
    ) -> Self {
        Self::with_config(
            pool,
            telemetry,
            rate_limit,
            secret_scanning_enabled,
            memoryd_acb::DEFAULT_MAX_TOKENS,
        )
    }

    pub fn with_config(
        pool: PgPool,
        telemetry: TelemetrySink,
        rate_limit: RateLimitConfig,
        secret_scanning_enabled: bool,
        default_acb_max_tokens: i32,
    ) -> Self {
        Self {
            pool,
            telemetry,
            error_tracker: Arc::new(ErrorRateTracker::default()),
            event_limiter: Arc::new(FixedWindowLimiter::new(rate_limit.events_per_minute)),
            acb_limiter: Arc::new(FixedWindowLimiter::new(rate_limit.acb_builds_per_minute)),
            secret_scanning_enabled,
            default_acb_max_tokens,
        }
    }
}
