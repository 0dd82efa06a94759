//! Configuration types for the RPC client

use reqrep_transport::FrameConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server endpoint, `host:port`
    pub endpoint: String,

    /// Timeout configurations
    pub timeouts: TimeoutConfig,

    /// Framing limits for the TCP request socket
    pub frame: FrameConfig,

    /// Prefix of generated request ids (`{prefix}_{n}`)
    pub id_prefix: String,
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection timeout
    #[serde(with = "duration_serde")]
    pub connect: Duration,

    /// Time allowed for one request/response round trip
    #[serde(with = "duration_serde")]
    pub request: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "127.0.0.1:43000".to_string(),
            timeouts: TimeoutConfig::default(),
            frame: FrameConfig::default(),
            id_prefix: "req".to_string(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connect = timeout;
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

// Helper module for Duration serialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
