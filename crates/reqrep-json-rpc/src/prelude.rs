//! # JSON-RPC Core Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use reqrep_json_rpc::prelude::*;
//! ```

pub use crate::codec::{decode, decode_response, encode_request, encode_response};
pub use crate::dispatch::{HandlerOutcome, dispatch};
pub use crate::error::{ErrorCode, ErrorObject, ProtocolError};
pub use crate::handler::{MethodError, MethodHandler, MethodResult, typed};
pub use crate::registry::MethodRegistry;
pub use crate::request::{Params, ValidatedRequest};
pub use crate::response::ResponseEnvelope;
pub use crate::types::{JsonRpcVersion, RequestId};
pub use crate::validate::{parse_request, validate};

// Standard error codes
pub use crate::error_codes::*;
