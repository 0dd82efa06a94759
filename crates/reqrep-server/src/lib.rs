//! # Request/Reply JSON-RPC Server
//!
//! Binds method names to handlers and serves them over any
//! [`Transport`](reqrep_transport::Transport): one request in, exactly one
//! response out, until stopped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reqrep_server::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut server = RpcServer::builder()
//!         .name("hello-server")
//!         .bind_address("127.0.0.1:43000".parse()?)
//!         .method("hello", typed(|(name,): (String,)| Ok(format!("Hello, {}!", name))))
//!         .build()?;
//!
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod prelude;
pub mod server;

pub use builder::RpcServerBuilder;
pub use config::{DEFAULT_PORT, ServerConfig};
pub use error::{Result, ServerError};
pub use server::{RpcServer, ServerHandle, ServerState};

// Re-export the protocol layer for handler authors
pub use reqrep_json_rpc::{
    ErrorCode, MethodError, MethodHandler, MethodRegistry, MethodResult, Params, typed,
};
