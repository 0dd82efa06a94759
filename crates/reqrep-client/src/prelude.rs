//! # Client Prelude
//!
//! ```rust
//! use reqrep_client::prelude::*;
//! ```

pub use crate::client::RpcClient;
pub use crate::config::{ClientConfig, TimeoutConfig};
pub use crate::error::{ClientError, ClientResult};

pub use reqrep_json_rpc::{ErrorCode, Params, RequestId, ResponseEnvelope};
pub use reqrep_transport::{ChannelTransport, TcpRequestSocket, Transport};
