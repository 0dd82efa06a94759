//! Server configuration

use std::net::{Ipv4Addr, SocketAddr};

use reqrep_transport::FrameConfig;
use serde::{Deserialize, Serialize};

/// Port served when none is configured
pub const DEFAULT_PORT: u16 = 43000;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the TCP reply socket binds to
    pub bind_address: SocketAddr,

    /// Framing limits for the TCP reply socket
    pub frame: FrameConfig,

    /// Stop the serve loop on Ctrl-C
    pub stop_on_ctrl_c: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            frame: FrameConfig::default(),
            stop_on_ctrl_c: true,
        }
    }
}

impl ServerConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.frame.max_frame_length == 0 {
            return Err("max_frame_length must be greater than zero".to_string());
        }
        Ok(())
    }
}
