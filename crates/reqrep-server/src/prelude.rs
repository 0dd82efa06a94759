//! # Server Prelude
//!
//! ```rust
//! use reqrep_server::prelude::*;
//! ```

pub use crate::builder::RpcServerBuilder;
pub use crate::config::ServerConfig;
pub use crate::error::ServerError;
pub use crate::server::{RpcServer, ServerHandle, ServerState};

pub use reqrep_json_rpc::{
    ErrorCode, MethodError, MethodHandler, MethodRegistry, MethodResult, Params, typed,
};
pub use reqrep_transport::{ChannelTransport, FrameConfig, TcpReplySocket, Transport};
