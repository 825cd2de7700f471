//! Configuration schema definitions.
//!
//! Declarative defaults for the transport options a deployment wants to
//! force on every forwarded request. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::transport::{OptionValue, TransportOption, TransportOptions};

/// Root configuration for the remote kernel.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Response buffering limits.
    pub limits: LimitConfig,

    /// Wire-level behavior.
    pub wire: WireConfig,
}

/// Timeout configuration for outbound exchanges.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total exchange timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Response buffering limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum buffered response body size in bytes.
    pub max_response_bytes: u64,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_response_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Wire-level behavior.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WireConfig {
    /// Prepend the response head to the returned bytes.
    pub include_headers: bool,

    /// User-Agent to send when the request carries none.
    pub user_agent: Option<String>,
}

impl ForwarderConfig {
    /// Render this configuration as caller-level transport options. These
    /// are merged after the computed per-request options, so they win on
    /// key collision.
    pub fn transport_options(&self) -> TransportOptions {
        let mut options = TransportOptions::new();

        options.set(
            TransportOption::ConnectTimeoutMs,
            OptionValue::Int(self.timeouts.connect_secs * 1000),
        );
        options.set(
            TransportOption::TimeoutMs,
            OptionValue::Int(self.timeouts.request_secs * 1000),
        );
        options.set(
            TransportOption::MaxResponseBytes,
            OptionValue::Int(self.limits.max_response_bytes),
        );

        if self.wire.include_headers {
            options.set(TransportOption::IncludeHeaders, OptionValue::Flag(true));
        }
        if let Some(agent) = &self.wire.user_agent {
            options.set(TransportOption::UserAgent, OptionValue::Str(agent.clone()));
        }

        options
    }
}
