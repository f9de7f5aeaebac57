// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub acb: AcbConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub privacy: PrivacyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "ServerConfig::default_bind_addr")]
    pub bind_addr: String,
}

impl ServerConfig {
    fn default_bind_addr() -> String {
        "0.0.0.0:8080".into()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: Self::default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Postgres connection string. Empty by default; must be supplied via
    /// config file or the `MEMORYD_STORE__DSN` env override before `serve`
    /// will start.
    #[serde(default)]
    pub dsn: String,
    #[serde(default = "StoreConfig::default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "StoreConfig::default_statement_timeout_secs")]
    pub statement_timeout_secs: u64,
}

impl StoreConfig {
    fn default_pool_size() -> u32 {
        20
    }
    fn default_statement_timeout_secs() -> u64 {
        30
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dsn: String::new(),
            pool_size: Self::default_pool_size(),
            statement_timeout_secs: Self::default_statement_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcbConfig {
    #[serde(default = "AcbConfig::default_max_tokens")]
    pub default_max_tokens: i32,
}

impl AcbConfig {
    fn default_max_tokens() -> i32 {
        65_000
    }
}

impl Default for AcbConfig {
    fn default() -> Self {
        Self {
            default_max_tokens: Self::default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "RateLimitConfig::default_events_per_minute")]
    pub events_per_minute: u32,
    #[serde(default = "RateLimitConfig::default_acb_builds_per_minute")]
    pub acb_builds_per_minute: u32,
}

impl RateLimitConfig {
    fn default_events_per_minute() -> u32 {
        100
    }
    fn default_acb_builds_per_minute() -> u32 {
        60
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            events_per_minute: Self::default_events_per_minute(),
            acb_builds_per_minute: Self::default_acb_builds_per_minute(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Remote telemetry sink endpoint. `None` disables remote flushing;
    /// buffered records are still retained in-process.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "TelemetryConfig::default_sample_rate")]
    pub sample_rate: f32,
}

impl TelemetryConfig {
    fn default_sample_rate() -> f32 {
        1.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyConfig {
    #[serde(default = "default_true")]
    pub secret_scanning_enabled: bool,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            secret_scanning_enabled: true,
        }
    }
}
