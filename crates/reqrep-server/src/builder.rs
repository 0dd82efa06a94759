//! RPC Server Builder
//!
//! This module provides a builder pattern for creating RPC servers.

use std::net::SocketAddr;

use reqrep_json_rpc::{MethodHandler, MethodRegistry};
use reqrep_transport::FrameConfig;

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::server::RpcServer;

/// Builder for RPC servers
///
/// All methods must be registered here: once built, the server's method
/// table is frozen.
pub struct RpcServerBuilder {
    name: String,
    config: ServerConfig,
    registry: MethodRegistry,
}

impl RpcServerBuilder {
    pub fn new() -> Self {
        Self {
            name: "reqrep-server".to_string(),
            config: ServerConfig::default(),
            registry: MethodRegistry::new(),
        }
    }

    /// Server name, used in logs
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.config.bind_address = addr;
        self
    }

    pub fn frame(mut self, frame: FrameConfig) -> Self {
        self.config.frame = frame;
        self
    }

    pub fn max_frame_length(mut self, max_frame_length: usize) -> Self {
        self.config.frame.max_frame_length = max_frame_length;
        self
    }

    pub fn stop_on_ctrl_c(mut self, enabled: bool) -> Self {
        self.config.stop_on_ctrl_c = enabled;
        self
    }

    /// Bind a handler to a method name. Registering a name twice keeps the
    /// last handler.
    pub fn method<H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: MethodHandler + 'static,
    {
        self.registry.register(name, handler);
        self
    }

    /// Start from an existing method table
    pub fn registry(mut self, registry: MethodRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> Result<RpcServer> {
        self.config.validate().map_err(ServerError::Config)?;
        Ok(RpcServer::new(self.name, self.config, self.registry))
    }
}

impl Default for RpcServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
