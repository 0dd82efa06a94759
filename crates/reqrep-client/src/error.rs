//! Error types for RPC client operations

use reqrep_json_rpc::{ErrorCode, ErrorObject, ProtocolError, RequestId};
use reqrep_transport::TransportError;
use thiserror::Error;

/// Result type for RPC client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The request could not be encoded or the reply was not a response
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The result did not have the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No reply within the configured time. The connection still owes a
    /// reply and must be reopened.
    #[error("Operation timed out")]
    Timeout,

    /// The server answered with an error response
    #[error("Server error (code {}): {message}", .code.code())]
    Rpc { code: ErrorCode, message: String },

    #[error("Response id {actual} does not match request id {expected}")]
    IdMismatch {
        expected: RequestId,
        actual: RequestId,
    },
}

impl ClientError {
    /// Get the error code if this is a server error
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<ErrorObject> for ClientError {
    fn from(error: ErrorObject) -> Self {
        Self::Rpc {
            code: error.code,
            message: error.message,
        }
    }
}
