//! Framing configuration shared by the TCP sockets

use serde::{Deserialize, Serialize};
use tokio_util::codec::LengthDelimitedCodec;

/// Default largest accepted frame: 8 MiB
pub const DEFAULT_MAX_FRAME_LENGTH: usize = 8 * 1024 * 1024;

/// Wire framing: each message is a 4-byte big-endian length prefix followed
/// by the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Largest payload accepted or sent, in bytes
    pub max_frame_length: usize,
}

impl FrameConfig {
    pub fn with_max_frame_length(mut self, max_frame_length: usize) -> Self {
        self.max_frame_length = max_frame_length;
        self
    }

    pub(crate) fn codec(&self) -> LengthDelimitedCodec {
        LengthDelimitedCodec::builder()
            .length_field_length(4)
            .max_frame_length(self.max_frame_length)
            .new_codec()
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_length: DEFAULT_MAX_FRAME_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_config_serialization() {
        let config = FrameConfig::default().with_max_frame_length(1024);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"max_frame_length":1024}"#);
        let parsed: FrameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
