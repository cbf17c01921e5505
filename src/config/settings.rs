use std::time::Duration;

use serde::Deserialize;

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub http: HttpClientConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            is_enabled: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

/// ================================
/// Outbound HTTP timeouts, seconds
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HttpClientConfig {
    pub dial_timeout_seconds: u64,
    pub keep_alive_seconds: u64,
    pub tls_handshake_timeout_seconds: u64,
    pub response_header_timeout_seconds: u64,
    pub expect_continue_timeout_seconds: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            dial_timeout_seconds: 30,
            keep_alive_seconds: 30,
            tls_handshake_timeout_seconds: 10,
            response_header_timeout_seconds: 10,
            expect_continue_timeout_seconds: 1,
        }
    }
}

impl HttpClientConfig {
    /// reqwest has a single connect phase covering TCP and TLS
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.dial_timeout_seconds + self.tls_handshake_timeout_seconds)
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_seconds)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.response_header_timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: 60,
        }
    }
}

impl CacheConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}
