//! # Request/Reply JSON-RPC Client
//!
//! A sequential client for servers built with `reqrep-server`: one request,
//! one reply, with generated request ids and per-request timeouts.
//!
//! ```rust,no_run
//! use reqrep_client::{ClientConfig, RpcClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_endpoint("127.0.0.1:43000");
//!     let mut client = RpcClient::connect(config).await?;
//!
//!     let greeting = client.call("hello", vec![json!("world")]).await?;
//!     println!("{}", greeting);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod prelude;

pub use client::RpcClient;
pub use config::{ClientConfig, TimeoutConfig};
pub use error::{ClientError, ClientResult};

pub use reqrep_json_rpc::{ErrorCode, Params, RequestId, ResponseEnvelope};
