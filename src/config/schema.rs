//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the upload relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Simulate the backend instead of calling it. Uploads are refused.
    pub use_mocks: bool,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream reports service.
    pub upstream: UpstreamConfig,

    /// Timeouts applied to the outbound call.
    pub timeouts: TimeoutConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Upstream reports service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the reports API (e.g., "http://127.0.0.1:8000").
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

/// Timeout configuration for the outbound call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time for the upstream request/response in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 60,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted multipart body in bytes.
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            // 10 MiB upstream file cap plus room for the other form fields
            max_upload_bytes: 11 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: RelayConfig = toml::from_str("use_mocks = true").unwrap();
        assert!(config.use_mocks);
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeouts.request_secs, 60);
        assert_eq!(config.limits.max_upload_bytes, 11 * 1024 * 1024);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "https://reports.internal"

            [timeouts]
            request_secs = 15
            "#,
        )
        .unwrap();
        assert!(!config.use_mocks);
        assert_eq!(config.upstream.base_url, "https://reports.internal");
        assert_eq!(config.timeouts.request_secs, 15);
        assert_eq!(config.timeouts.connect_secs, 5);
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }
}
