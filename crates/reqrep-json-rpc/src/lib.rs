//! # JSON-RPC Request/Reply Core
//!
//! A transport-agnostic JSON-RPC 2.0 protocol layer for strictly
//! request/reply transports: one request in, exactly one response out.
//! This crate holds the envelope codec, the request validator, the method
//! registry and the dispatcher, with no I/O of its own.
//!
//! ## Processing a request
//!
//! ```rust
//! use reqrep_json_rpc::prelude::*;
//!
//! let mut registry = MethodRegistry::new();
//! registry.register("hello", typed(|(name,): (String,)| Ok(format!("Hello, {}!", name))));
//!
//! let request = br#"{"jsonrpc": "2.0", "method": "hello", "params": ["world"], "id": 1}"#;
//! let response = match parse_request(request) {
//!     Ok(request) => dispatch(&registry, request),
//!     Err(fault) => ResponseEnvelope::error_without_id(fault.to_error_object()),
//! };
//!
//! assert_eq!(response.result, Some(serde_json::json!("Hello, world!")));
//! assert_eq!(response.id, RequestId::Number(1));
//! ```

pub mod codec;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod prelude;
pub mod registry;
pub mod request;
pub mod response;
pub mod types;
pub mod validate;

// Re-export main types
pub use dispatch::{HandlerOutcome, dispatch};
pub use error::{ErrorCode, ErrorObject, ProtocolError};
pub use handler::{MethodError, MethodHandler, MethodResult, typed};
pub use registry::MethodRegistry;
pub use request::{Params, RequestEnvelope, ValidatedRequest};
pub use response::ResponseEnvelope;
pub use types::{JsonRpcVersion, RequestId};
pub use validate::{parse_request, validate};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}
